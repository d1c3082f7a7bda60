use sqlx::SqlitePool;

use crate::models::UserRow;

const SQL_INSERT_SESSION: &str = r#"
INSERT INTO sesion (token, usuario_id, expires_at)
VALUES (?1, ?2, datetime('now', ?3))
"#;

pub async fn insert_session(
    pool: &SqlitePool,
    token: &str,
    usuario_id: i64,
    ttl_hours: i64,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_SESSION)
        .bind(token)
        .bind(usuario_id)
        .bind(format!("+{} hours", ttl_hours))
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_LOAD_SESSION_USER: &str = r#"
SELECT
  u.id_usuario,
  u.nombres,
  u.apellidos,
  u.correo,
  u.telefono,
  u.dni,
  u.rol,
  u.created_at,
  u.updated_at
FROM sesion s
JOIN usuario u
  ON u.id_usuario = s.usuario_id
WHERE s.token = ?1
  AND s.expires_at > datetime('now')
LIMIT 1
"#;

pub async fn load_session_user(pool: &SqlitePool, token: &str) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(SQL_LOAD_SESSION_USER)
        .bind(token)
        .fetch_optional(pool)
        .await
}

const SQL_DELETE_SESSION: &str = r#"
DELETE FROM sesion
WHERE token = ?
"#;

pub async fn delete_session(pool: &SqlitePool, token: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_SESSION)
        .bind(token)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_EXPIRED_SESSIONS: &str = r#"
DELETE FROM sesion
WHERE expires_at <= datetime('now')
"#;

pub async fn delete_expired_sessions(pool: &SqlitePool) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_EXPIRED_SESSIONS)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
