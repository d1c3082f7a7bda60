use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{CertificateRow, CertificateStatus};

const SQL_LIST_CERTIFICATES: &str = r#"
SELECT
  c.id_certificado,
  c.codigo_validacion,
  c.asistencia_id,
  c.estado,
  c.fecha_emision,
  c.url_pdf,
  s.presente,
  u.nombres || ' ' || u.apellidos AS participante,
  a.titulo AS actividad
FROM certificado c
JOIN asistencia s
  ON s.id_asistencia = c.asistencia_id
JOIN inscripcion i
  ON i.id_inscripcion = s.inscripcion_id
JOIN usuario u
  ON u.id_usuario = i.usuario_id
JOIN actividad a
  ON a.id_actividad = i.actividad_id
WHERE (?1 IS NULL OR c.estado = ?1)
ORDER BY c.id_certificado ASC
"#;

pub async fn list_certificates(
    pool: &SqlitePool,
    estado: Option<CertificateStatus>,
) -> sqlx::Result<Vec<CertificateRow>> {
    sqlx::query_as::<_, CertificateRow>(SQL_LIST_CERTIFICATES)
        .bind(estado.map(CertificateStatus::as_str))
        .fetch_all(pool)
        .await
}

const SQL_LOAD_CERTIFICATE_BY_CODE: &str = r#"
SELECT
  c.id_certificado,
  c.codigo_validacion,
  c.asistencia_id,
  c.estado,
  c.fecha_emision,
  c.url_pdf,
  s.presente,
  u.nombres || ' ' || u.apellidos AS participante,
  a.titulo AS actividad
FROM certificado c
JOIN asistencia s
  ON s.id_asistencia = c.asistencia_id
JOIN inscripcion i
  ON i.id_inscripcion = s.inscripcion_id
JOIN usuario u
  ON u.id_usuario = i.usuario_id
JOIN actividad a
  ON a.id_actividad = i.actividad_id
WHERE c.codigo_validacion = ?1
LIMIT 1
"#;

pub async fn load_certificate_by_code(
    pool: &SqlitePool,
    codigo: &str,
) -> sqlx::Result<Option<CertificateRow>> {
    sqlx::query_as::<_, CertificateRow>(SQL_LOAD_CERTIFICATE_BY_CODE)
        .bind(codigo)
        .fetch_optional(pool)
        .await
}

const SQL_LOAD_ATTENDANCE_PRESENCE: &str = r#"
SELECT presente
FROM asistencia
WHERE id_asistencia = ?1
"#;

pub async fn load_attendance_presence(
    conn: &mut SqliteConnection,
    asistencia_id: i64,
) -> sqlx::Result<Option<bool>> {
    sqlx::query_scalar::<_, bool>(SQL_LOAD_ATTENDANCE_PRESENCE)
        .bind(asistencia_id)
        .fetch_optional(conn)
        .await
}

// Codes look like CERT-YYYY-NNN; the sequence starts after the 10-char
// "CERT-YYYY-" prefix.
const SQL_MAX_SEQUENCE_FOR_YEAR: &str = r#"
SELECT MAX(CAST(SUBSTR(codigo_validacion, 11) AS INTEGER))
FROM certificado
WHERE codigo_validacion LIKE ?1
"#;

pub async fn max_sequence_for_year(
    conn: &mut SqliteConnection,
    year: i32,
) -> sqlx::Result<Option<i64>> {
    sqlx::query_scalar::<_, Option<i64>>(SQL_MAX_SEQUENCE_FOR_YEAR)
        .bind(format!("CERT-{:04}-%", year))
        .fetch_one(conn)
        .await
}

const SQL_INSERT_CERTIFICATE: &str = r#"
INSERT INTO certificado (
  codigo_validacion,
  asistencia_id,
  estado,
  fecha_emision,
  url_pdf
) VALUES (?, ?, ?, ?, ?)
"#;

pub struct NewCertificate<'a> {
    pub codigo_validacion: &'a str,
    pub asistencia_id: i64,
    pub estado: CertificateStatus,
    pub fecha_emision: Option<NaiveDate>,
    pub url_pdf: Option<&'a str>,
}

pub async fn insert_certificate(
    conn: &mut SqliteConnection,
    certificate: NewCertificate<'_>,
) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_CERTIFICATE)
        .bind(certificate.codigo_validacion)
        .bind(certificate.asistencia_id)
        .bind(certificate.estado.as_str())
        .bind(certificate.fecha_emision)
        .bind(certificate.url_pdf)
        .execute(conn)
        .await?;
    Ok(res.last_insert_rowid())
}

const SQL_COUNT_CERTIFICATES_BY_STATUS: &str = r#"
SELECT estado, COUNT(*)
FROM certificado
GROUP BY estado
"#;

pub async fn count_certificates_by_status(pool: &SqlitePool) -> sqlx::Result<Vec<(String, i64)>> {
    sqlx::query_as::<_, (String, i64)>(SQL_COUNT_CERTIFICATES_BY_STATUS)
        .fetch_all(pool)
        .await
}
