//! Field checks shared by the request bodies that derive `Validate`.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use validator::ValidationError;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("blank", "el campo es obligatorio"));
    }
    Ok(())
}

pub fn person_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < 2 {
        return Err(invalid("name", "debe tener al menos 2 caracteres"));
    }
    Ok(())
}

/// Peruvian mobile numbers: 9 digits once spaces, dashes and the like are
/// stripped.
pub fn phone(value: &str) -> Result<(), ValidationError> {
    if digits_only(value).len() != 9 {
        return Err(invalid("phone", "el teléfono debe tener 9 dígitos"));
    }
    Ok(())
}

pub fn dni(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.len() != 8 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("dni", "el DNI debe tener 8 dígitos"));
    }
    Ok(())
}

pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Trims an optional text field; blank becomes `None`.
pub fn clean(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// `deserialize_with` hook so format validators see the trimmed value.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?.trim().to_string())
}

pub fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(|s| s.trim().to_string()))
}
