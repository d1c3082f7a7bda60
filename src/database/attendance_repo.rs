use sqlx::SqlitePool;

use crate::models::AttendanceRow;

const SQL_LIST_ATTENDANCE: &str = r#"
SELECT
  s.id_asistencia,
  s.inscripcion_id,
  s.sesion,
  s.presente,
  s.registrado_en,
  u.nombres || ' ' || u.apellidos AS participante,
  u.dni,
  a.id_actividad AS actividad_id,
  a.titulo AS actividad
FROM asistencia s
JOIN inscripcion i
  ON i.id_inscripcion = s.inscripcion_id
JOIN usuario u
  ON u.id_usuario = i.usuario_id
JOIN actividad a
  ON a.id_actividad = i.actividad_id
WHERE (?1 IS NULL OR a.id_actividad = ?1)
ORDER BY s.id_asistencia ASC
"#;

pub async fn list_attendance(
    pool: &SqlitePool,
    actividad_id: Option<i64>,
) -> sqlx::Result<Vec<AttendanceRow>> {
    sqlx::query_as::<_, AttendanceRow>(SQL_LIST_ATTENDANCE)
        .bind(actividad_id)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_ATTENDANCE_BY_ID: &str = r#"
SELECT
  s.id_asistencia,
  s.inscripcion_id,
  s.sesion,
  s.presente,
  s.registrado_en,
  u.nombres || ' ' || u.apellidos AS participante,
  u.dni,
  a.id_actividad AS actividad_id,
  a.titulo AS actividad
FROM asistencia s
JOIN inscripcion i
  ON i.id_inscripcion = s.inscripcion_id
JOIN usuario u
  ON u.id_usuario = i.usuario_id
JOIN actividad a
  ON a.id_actividad = i.actividad_id
WHERE s.id_asistencia = ?1
LIMIT 1
"#;

pub async fn load_attendance(
    pool: &SqlitePool,
    id_asistencia: i64,
) -> sqlx::Result<Option<AttendanceRow>> {
    sqlx::query_as::<_, AttendanceRow>(SQL_LOAD_ATTENDANCE_BY_ID)
        .bind(id_asistencia)
        .fetch_optional(pool)
        .await
}

const SQL_INSERT_ATTENDANCE: &str = r#"
INSERT INTO asistencia (
  inscripcion_id,
  sesion,
  presente
) VALUES (?, ?, ?)
"#;

pub async fn insert_attendance(
    pool: &SqlitePool,
    inscripcion_id: i64,
    sesion: &str,
    presente: bool,
) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_ATTENDANCE)
        .bind(inscripcion_id)
        .bind(sesion)
        .bind(presente)
        .execute(pool)
        .await?;
    Ok(res.last_insert_rowid())
}

const SQL_TOGGLE_ATTENDANCE: &str = r#"
UPDATE asistencia
SET presente = NOT presente
WHERE id_asistencia = ?
"#;

pub async fn toggle_attendance(pool: &SqlitePool, id_asistencia: i64) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_TOGGLE_ATTENDANCE)
        .bind(id_asistencia)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_COUNT_ATTENDANCE: &str = r#"
SELECT
  COUNT(*) AS total,
  COALESCE(SUM(CASE WHEN s.presente THEN 1 ELSE 0 END), 0) AS presentes
FROM asistencia s
JOIN inscripcion i
  ON i.id_inscripcion = s.inscripcion_id
WHERE (?1 IS NULL OR i.actividad_id = ?1)
"#;

pub async fn count_attendance(
    pool: &SqlitePool,
    actividad_id: Option<i64>,
) -> sqlx::Result<(i64, i64)> {
    sqlx::query_as::<_, (i64, i64)>(SQL_COUNT_ATTENDANCE)
        .bind(actividad_id)
        .fetch_one(pool)
        .await
}
