//! Accounts and sessions.
//!
//! Passwords are stored as Argon2id PHC strings. A session is an opaque
//! random token in the `sesion` table; [`current_user`] is the single lookup
//! the web layer uses to turn a token into a user.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose, Engine as _};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, warn};
use validator::Validate;

use crate::database::{session_repo, user_repo};
use crate::error::{AppError, AppResult};
use crate::models::{Role, UserRow};
use crate::services::user_service::{duplicate_email, normalize_email};
use crate::services::validation::{self, digits_only};

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(custom(function = "validation::person_name"))]
    pub nombres: String,
    #[validate(custom(function = "validation::person_name"))]
    pub apellidos: String,
    #[serde(deserialize_with = "validation::trimmed")]
    #[validate(email(message = "el correo no es válido"))]
    pub correo: String,
    #[validate(custom(function = "validation::phone"))]
    pub telefono: String,
    #[validate(custom(function = "validation::dni"))]
    pub dni: String,
    #[validate(length(min = 6, message = "la contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "las contraseñas no coinciden"))]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub correo: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub token: String,
    pub expira_en_horas: i64,
    pub usuario: UserRow,
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("failed to hash password: {e}").into()))
}

/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        warn!("Stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub fn new_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

pub async fn signup(pool: &SqlitePool, ttl_hours: i64, req: SignupRequest) -> AppResult<SessionView> {
    req.validate()?;

    let correo = normalize_email(&req.correo);
    let telefono = digits_only(&req.telefono);
    let password_hash = hash_password(&req.password)?;

    let id = user_repo::insert_user(
        pool,
        user_repo::NewUser {
            nombres: req.nombres.trim(),
            apellidos: req.apellidos.trim(),
            correo: &correo,
            telefono: Some(&telefono),
            dni: Some(req.dni.trim()),
            rol: Role::Participante,
            password_hash: &password_hash,
        },
    )
    .await
    .map_err(|e| duplicate_email(e, &correo))?;

    info!("Participant {} signed up", id);
    open_session(pool, ttl_hours, id).await
}

pub async fn login(pool: &SqlitePool, ttl_hours: i64, req: LoginRequest) -> AppResult<SessionView> {
    let correo = normalize_email(&req.correo);
    let credentials = user_repo::load_credentials_by_email(pool, &correo).await?;

    let Some(credentials) = credentials.filter(|c| verify_password(&req.password, &c.password_hash))
    else {
        warn!("Failed login for {}", correo);
        return Err(AppError::Unauthorized);
    };

    open_session(pool, ttl_hours, credentials.id_usuario).await
}

pub async fn logout(pool: &SqlitePool, token: &str) -> AppResult<()> {
    session_repo::delete_session(pool, token).await?;
    Ok(())
}

/// Resolves a session token to its user; expired or unknown tokens give
/// `None`.
pub async fn current_user(pool: &SqlitePool, token: &str) -> AppResult<Option<UserRow>> {
    Ok(session_repo::load_session_user(pool, token).await?)
}

async fn open_session(pool: &SqlitePool, ttl_hours: i64, id_usuario: i64) -> AppResult<SessionView> {
    let token = new_session_token();
    session_repo::insert_session(pool, &token, id_usuario, ttl_hours).await?;
    let swept = session_repo::delete_expired_sessions(pool).await?;
    if swept > 0 {
        info!("Removed {} expired sessions", swept);
    }

    let usuario = user_repo::load_user(pool, id_usuario)
        .await?
        .ok_or(AppError::NotFound("usuario"))?;
    Ok(SessionView {
        token,
        expira_en_horas: ttl_hours,
        usuario,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("clave-segura").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("clave-segura", &hash));
        assert!(!verify_password("otra-clave", &hash));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("clave", "not-a-valid-hash"));
    }

    #[test]
    fn session_tokens_are_unique_and_url_safe() {
        let a = new_session_token();
        let b = new_session_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn signup_requires_matching_passwords() {
        let req = SignupRequest {
            nombres: "Juan".to_string(),
            apellidos: "García López".to_string(),
            correo: "juan@unas.edu.pe".to_string(),
            telefono: "987654321".to_string(),
            dni: "12345678".to_string(),
            password: "secreto1".to_string(),
            confirm_password: "secreto2".to_string(),
        };
        let AppError::Validation(fields) = AppError::from(req.validate().unwrap_err()) else {
            panic!("expected a validation error");
        };
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("confirm_password"));
    }
}
