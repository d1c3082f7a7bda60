use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{InscriptionRow, InscriptionStatus};

const SQL_LIST_INSCRIPTIONS: &str = r#"
SELECT
  i.id_inscripcion,
  i.usuario_id,
  i.actividad_id,
  i.estado,
  i.fecha_inscripcion,
  u.nombres,
  u.apellidos,
  u.correo,
  a.titulo,
  a.fecha_inicio
FROM inscripcion i
JOIN usuario u
  ON u.id_usuario = i.usuario_id
JOIN actividad a
  ON a.id_actividad = i.actividad_id
WHERE (?1 IS NULL OR i.actividad_id = ?1)
  AND (?2 IS NULL OR i.usuario_id = ?2)
ORDER BY i.id_inscripcion ASC
"#;

pub async fn list_inscriptions(
    pool: &SqlitePool,
    actividad_id: Option<i64>,
    usuario_id: Option<i64>,
) -> sqlx::Result<Vec<InscriptionRow>> {
    sqlx::query_as::<_, InscriptionRow>(SQL_LIST_INSCRIPTIONS)
        .bind(actividad_id)
        .bind(usuario_id)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_INSCRIPTION_BY_ID: &str = r#"
SELECT
  i.id_inscripcion,
  i.usuario_id,
  i.actividad_id,
  i.estado,
  i.fecha_inscripcion,
  u.nombres,
  u.apellidos,
  u.correo,
  a.titulo,
  a.fecha_inicio
FROM inscripcion i
JOIN usuario u
  ON u.id_usuario = i.usuario_id
JOIN actividad a
  ON a.id_actividad = i.actividad_id
WHERE i.id_inscripcion = ?1
LIMIT 1
"#;

pub async fn load_inscription(
    pool: &SqlitePool,
    id_inscripcion: i64,
) -> sqlx::Result<Option<InscriptionRow>> {
    sqlx::query_as::<_, InscriptionRow>(SQL_LOAD_INSCRIPTION_BY_ID)
        .bind(id_inscripcion)
        .fetch_optional(pool)
        .await
}

const SQL_INSERT_INSCRIPTION: &str = r#"
INSERT INTO inscripcion (
  usuario_id,
  actividad_id,
  estado
) VALUES (?, ?, ?)
"#;

pub async fn insert_inscription(
    conn: &mut SqliteConnection,
    usuario_id: i64,
    actividad_id: i64,
    estado: InscriptionStatus,
) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_INSCRIPTION)
        .bind(usuario_id)
        .bind(actividad_id)
        .bind(estado.as_str())
        .execute(conn)
        .await?;
    Ok(res.last_insert_rowid())
}
