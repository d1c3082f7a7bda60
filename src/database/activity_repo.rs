use chrono::NaiveDate;
use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};

use crate::models::{ActivityRow, ActivityStatus, ActivityType};

const SQL_LIST_ACTIVITIES: &str = r#"
SELECT
  a.id_actividad,
  a.titulo,
  a.descripcion,
  a.fecha_inicio,
  a.fecha_fin,
  a.lugar,
  a.tipo,
  a.estado,
  a.capacidad,
  a.inscritos,
  a.organizador_id,
  u.nombres || ' ' || u.apellidos AS organizador_nombre,
  a.responsable,
  a.created_at
FROM actividad a
LEFT JOIN usuario u
  ON u.id_usuario = a.organizador_id
ORDER BY a.id_actividad ASC
"#;

pub async fn list_activities(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_LIST_ACTIVITIES)
        .fetch_all(pool)
        .await
}

const SQL_LIST_CATALOG_PAGE: &str = r#"
SELECT
  a.id_actividad,
  a.titulo,
  a.descripcion,
  a.fecha_inicio,
  a.fecha_fin,
  a.lugar,
  a.tipo,
  a.estado,
  a.capacidad,
  a.inscritos,
  a.organizador_id,
  u.nombres || ' ' || u.apellidos AS organizador_nombre,
  a.responsable,
  a.created_at
FROM actividad a
LEFT JOIN usuario u
  ON u.id_usuario = a.organizador_id
WHERE (?1 IS NULL OR a.tipo = ?1)
  AND (?2 IS NULL OR a.estado = ?2)
ORDER BY a.id_actividad ASC
LIMIT ?3 OFFSET ?4
"#;

pub async fn list_catalog_page(
    pool: &SqlitePool,
    tipo: Option<ActivityType>,
    estado: Option<ActivityStatus>,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_LIST_CATALOG_PAGE)
        .bind(tipo.map(ActivityType::as_str))
        .bind(estado.map(ActivityStatus::as_str))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}

const SQL_COUNT_CATALOG: &str = r#"
SELECT COUNT(*)
FROM actividad
WHERE (?1 IS NULL OR tipo = ?1)
  AND (?2 IS NULL OR estado = ?2)
"#;

pub async fn count_catalog(
    pool: &SqlitePool,
    tipo: Option<ActivityType>,
    estado: Option<ActivityStatus>,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_CATALOG)
        .bind(tipo.map(ActivityType::as_str))
        .bind(estado.map(ActivityStatus::as_str))
        .fetch_one(pool)
        .await
}

const SQL_LOAD_ACTIVITY_BY_ID: &str = r#"
SELECT
  a.id_actividad,
  a.titulo,
  a.descripcion,
  a.fecha_inicio,
  a.fecha_fin,
  a.lugar,
  a.tipo,
  a.estado,
  a.capacidad,
  a.inscritos,
  a.organizador_id,
  u.nombres || ' ' || u.apellidos AS organizador_nombre,
  a.responsable,
  a.created_at
FROM actividad a
LEFT JOIN usuario u
  ON u.id_usuario = a.organizador_id
WHERE a.id_actividad = ?1
LIMIT 1
"#;

pub async fn load_activity<'e, E>(executor: E, id_actividad: i64) -> sqlx::Result<Option<ActivityRow>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, ActivityRow>(SQL_LOAD_ACTIVITY_BY_ID)
        .bind(id_actividad)
        .fetch_optional(executor)
        .await
}

const SQL_INSERT_ACTIVITY: &str = r#"
INSERT INTO actividad (
  titulo,
  descripcion,
  fecha_inicio,
  fecha_fin,
  lugar,
  tipo,
  estado,
  capacidad,
  inscritos,
  organizador_id,
  responsable
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

pub struct NewActivity<'a> {
    pub titulo: &'a str,
    pub descripcion: Option<&'a str>,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub lugar: Option<&'a str>,
    pub tipo: ActivityType,
    pub estado: ActivityStatus,
    pub capacidad: i64,
    pub inscritos: i64, // 0 except for imported data
    pub organizador_id: Option<i64>,
    pub responsable: Option<&'a str>,
}

pub async fn insert_activity(pool: &SqlitePool, activity: NewActivity<'_>) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_ACTIVITY)
        .bind(activity.titulo)
        .bind(activity.descripcion)
        .bind(activity.fecha_inicio)
        .bind(activity.fecha_fin)
        .bind(activity.lugar)
        .bind(activity.tipo.as_str())
        .bind(activity.estado.as_str())
        .bind(activity.capacidad)
        .bind(activity.inscritos)
        .bind(activity.organizador_id)
        .bind(activity.responsable)
        .execute(pool)
        .await?;
    Ok(res.last_insert_rowid())
}

const SQL_UPDATE_ACTIVITY: &str = r#"
UPDATE actividad
SET titulo = COALESCE(?1, titulo),
    descripcion = COALESCE(?2, descripcion),
    fecha_inicio = COALESCE(?3, fecha_inicio),
    fecha_fin = COALESCE(?4, fecha_fin),
    lugar = COALESCE(?5, lugar),
    tipo = COALESCE(?6, tipo),
    estado = COALESCE(?7, estado),
    capacidad = COALESCE(?8, capacidad),
    organizador_id = COALESCE(?9, organizador_id),
    responsable = COALESCE(?10, responsable)
WHERE id_actividad = ?11
"#;

/// Fields left as `None` keep their stored value.
#[derive(Default)]
pub struct ActivityChanges<'a> {
    pub titulo: Option<&'a str>,
    pub descripcion: Option<&'a str>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    pub lugar: Option<&'a str>,
    pub tipo: Option<ActivityType>,
    pub estado: Option<ActivityStatus>,
    pub capacidad: Option<i64>,
    pub organizador_id: Option<i64>,
    pub responsable: Option<&'a str>,
}

pub async fn update_activity(
    pool: &SqlitePool,
    id_actividad: i64,
    changes: ActivityChanges<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_ACTIVITY)
        .bind(changes.titulo)
        .bind(changes.descripcion)
        .bind(changes.fecha_inicio)
        .bind(changes.fecha_fin)
        .bind(changes.lugar)
        .bind(changes.tipo.map(ActivityType::as_str))
        .bind(changes.estado.map(ActivityStatus::as_str))
        .bind(changes.capacidad)
        .bind(changes.organizador_id)
        .bind(changes.responsable)
        .bind(id_actividad)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_ACTIVITY: &str = r#"
DELETE FROM actividad
WHERE id_actividad = ?
"#;

pub async fn delete_activity(pool: &SqlitePool, id_actividad: i64) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_ACTIVITY)
        .bind(id_actividad)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

// Read-check-write in a single statement: the row only changes while there
// is a free spot and registration is open.
const SQL_CLAIM_SPOT: &str = r#"
UPDATE actividad
SET inscritos = inscritos + 1
WHERE id_actividad = ?
  AND estado = 'plazo_registro'
  AND inscritos < capacidad
"#;

pub async fn claim_spot(conn: &mut SqliteConnection, id_actividad: i64) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_CLAIM_SPOT)
        .bind(id_actividad)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

// Gives back every spot held by the user's inscriptions; run before the
// cascade removes them.
const SQL_RELEASE_USER_SPOTS: &str = r#"
UPDATE actividad
SET inscritos = MAX(inscritos - (
      SELECT COUNT(*)
      FROM inscripcion i
      WHERE i.actividad_id = actividad.id_actividad
        AND i.usuario_id = ?1
    ), 0)
WHERE id_actividad IN (
  SELECT actividad_id
  FROM inscripcion
  WHERE usuario_id = ?1
)
"#;

pub async fn release_user_spots(conn: &mut SqliteConnection, id_usuario: i64) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_RELEASE_USER_SPOTS)
        .bind(id_usuario)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}
