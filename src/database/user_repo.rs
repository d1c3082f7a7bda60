use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{Role, UserCredentialsRow, UserRow};

const SQL_LIST_USERS: &str = r#"
SELECT
  id_usuario,
  nombres,
  apellidos,
  correo,
  telefono,
  dni,
  rol,
  created_at,
  updated_at
FROM usuario
ORDER BY id_usuario ASC
"#;

pub async fn list_users(pool: &SqlitePool) -> sqlx::Result<Vec<UserRow>> {
    sqlx::query_as::<_, UserRow>(SQL_LIST_USERS)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_USER_BY_ID: &str = r#"
SELECT
  id_usuario,
  nombres,
  apellidos,
  correo,
  telefono,
  dni,
  rol,
  created_at,
  updated_at
FROM usuario
WHERE id_usuario = ?1
LIMIT 1
"#;

pub async fn load_user(pool: &SqlitePool, id_usuario: i64) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(SQL_LOAD_USER_BY_ID)
        .bind(id_usuario)
        .fetch_optional(pool)
        .await
}

const SQL_LOAD_CREDENTIALS_BY_EMAIL: &str = r#"
SELECT
  id_usuario,
  password_hash
FROM usuario
WHERE correo = ?1
LIMIT 1
"#;

pub async fn load_credentials_by_email(
    pool: &SqlitePool,
    correo: &str,
) -> sqlx::Result<Option<UserCredentialsRow>> {
    sqlx::query_as::<_, UserCredentialsRow>(SQL_LOAD_CREDENTIALS_BY_EMAIL)
        .bind(correo)
        .fetch_optional(pool)
        .await
}

const SQL_INSERT_USER: &str = r#"
INSERT INTO usuario (
  nombres,
  apellidos,
  correo,
  telefono,
  dni,
  rol,
  password_hash
) VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

pub struct NewUser<'a> {
    pub nombres: &'a str,
    pub apellidos: &'a str,
    pub correo: &'a str, // already lower-cased
    pub telefono: Option<&'a str>,
    pub dni: Option<&'a str>,
    pub rol: Role,
    pub password_hash: &'a str,
}

pub async fn insert_user(pool: &SqlitePool, user: NewUser<'_>) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_USER)
        .bind(user.nombres)
        .bind(user.apellidos)
        .bind(user.correo)
        .bind(user.telefono)
        .bind(user.dni)
        .bind(user.rol.as_str())
        .bind(user.password_hash)
        .execute(pool)
        .await?;
    Ok(res.last_insert_rowid())
}

const SQL_UPDATE_USER: &str = r#"
UPDATE usuario
SET nombres = COALESCE(?1, nombres),
    apellidos = COALESCE(?2, apellidos),
    correo = COALESCE(?3, correo),
    telefono = COALESCE(?4, telefono),
    dni = COALESCE(?5, dni),
    rol = COALESCE(?6, rol),
    updated_at = CURRENT_TIMESTAMP
WHERE id_usuario = ?7
"#;

#[derive(Default)]
pub struct UserChanges<'a> {
    pub nombres: Option<&'a str>,
    pub apellidos: Option<&'a str>,
    pub correo: Option<&'a str>,
    pub telefono: Option<&'a str>,
    pub dni: Option<&'a str>,
    pub rol: Option<Role>,
}

pub async fn update_user(
    pool: &SqlitePool,
    id_usuario: i64,
    changes: UserChanges<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_USER)
        .bind(changes.nombres)
        .bind(changes.apellidos)
        .bind(changes.correo)
        .bind(changes.telefono)
        .bind(changes.dni)
        .bind(changes.rol.map(Role::as_str))
        .bind(id_usuario)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_USER: &str = r#"
DELETE FROM usuario
WHERE id_usuario = ?
"#;

pub async fn delete_user(conn: &mut SqliteConnection, id_usuario: i64) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_USER)
        .bind(id_usuario)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}
