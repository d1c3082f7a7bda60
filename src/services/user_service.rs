use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::database::activity_repo;
use crate::database::user_repo::{self, NewUser, UserChanges};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::models::{Role, UserRow};
use crate::services::auth_service;
use crate::services::validation::{self, clean, digits_only};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(custom(function = "validation::person_name"))]
    pub nombres: String,
    #[validate(custom(function = "validation::person_name"))]
    pub apellidos: String,
    #[serde(deserialize_with = "validation::trimmed")]
    #[validate(email(message = "el correo no es válido"))]
    pub correo: String,
    #[validate(custom(function = "validation::phone"))]
    pub telefono: Option<String>,
    #[validate(custom(function = "validation::dni"))]
    pub dni: Option<String>,
    pub rol: Option<Role>,
    #[validate(length(min = 6, message = "la contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(custom(function = "validation::person_name"))]
    pub nombres: Option<String>,
    #[validate(custom(function = "validation::person_name"))]
    pub apellidos: Option<String>,
    #[serde(default, deserialize_with = "validation::trimmed_opt")]
    #[validate(email(message = "el correo no es válido"))]
    pub correo: Option<String>,
    #[validate(custom(function = "validation::phone"))]
    pub telefono: Option<String>,
    #[validate(custom(function = "validation::dni"))]
    pub dni: Option<String>,
    pub rol: Option<Role>,
}

/// Emails are compared and stored lower-cased.
pub fn normalize_email(correo: &str) -> String {
    correo.trim().to_lowercase()
}

pub async fn list_users(pool: &SqlitePool) -> AppResult<Vec<UserRow>> {
    Ok(user_repo::list_users(pool).await?)
}

pub async fn load_user(pool: &SqlitePool, id_usuario: i64) -> AppResult<UserRow> {
    user_repo::load_user(pool, id_usuario)
        .await?
        .ok_or(AppError::NotFound("usuario"))
}

pub async fn create_user(pool: &SqlitePool, req: CreateUserRequest) -> AppResult<UserRow> {
    req.validate()?;

    let correo = normalize_email(&req.correo);
    let telefono = clean(req.telefono.as_deref()).map(digits_only);
    let password_hash = auth_service::hash_password(&req.password)?;

    let id = user_repo::insert_user(
        pool,
        NewUser {
            nombres: req.nombres.trim(),
            apellidos: req.apellidos.trim(),
            correo: &correo,
            telefono: telefono.as_deref(),
            dni: clean(req.dni.as_deref()),
            rol: req.rol.unwrap_or(Role::Participante),
            password_hash: &password_hash,
        },
    )
    .await
    .map_err(|e| duplicate_email(e, &correo))?;

    info!("User {} created with role {}", id, req.rol.unwrap_or(Role::Participante));
    load_user(pool, id).await
}

pub async fn update_user(
    pool: &SqlitePool,
    id_usuario: i64,
    req: UpdateUserRequest,
) -> AppResult<UserRow> {
    req.validate()?;

    let correo = req.correo.as_deref().map(normalize_email);
    let telefono = clean(req.telefono.as_deref()).map(digits_only);

    let affected = user_repo::update_user(
        pool,
        id_usuario,
        UserChanges {
            nombres: req.nombres.as_deref().map(str::trim),
            apellidos: req.apellidos.as_deref().map(str::trim),
            correo: correo.as_deref(),
            telefono: telefono.as_deref(),
            dni: clean(req.dni.as_deref()),
            rol: req.rol,
        },
    )
    .await
    .map_err(|e| duplicate_email(e, correo.as_deref().unwrap_or_default()))?;
    if affected == 0 {
        return Err(AppError::NotFound("usuario"));
    }

    load_user(pool, id_usuario).await
}

/// Deleting a user cascades to their inscriptions, so the spots those held
/// are handed back in the same transaction.
pub async fn delete_user(pool: &SqlitePool, id_usuario: i64) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let released = activity_repo::release_user_spots(&mut *tx, id_usuario).await?;
    if user_repo::delete_user(&mut *tx, id_usuario).await? == 0 {
        return Err(AppError::NotFound("usuario"));
    }

    tx.commit().await?;
    info!("User {} deleted, released spots in {} activities", id_usuario, released);
    Ok(())
}

pub(crate) fn duplicate_email(err: sqlx::Error, correo: &str) -> AppError {
    if is_unique_violation(&err) {
        return AppError::conflict(format!("el correo {} ya está registrado", correo));
    }
    err.into()
}
