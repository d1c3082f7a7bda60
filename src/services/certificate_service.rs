use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::database::certificate_repo::{self, NewCertificate};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::models::{CertificateRow, CertificateStatus};
use crate::services::validation::clean;

#[derive(Debug, Serialize)]
pub struct CodeCheck {
    pub valido: bool,
    pub codigo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificado: Option<CertificateRow>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CertificateStats {
    pub total: i64,
    pub emitidos: i64,
    pub pendientes: i64,
    pub rechazados: i64,
}

#[derive(Debug, Deserialize, Default)]
pub struct CertificateQuery {
    pub estado: Option<CertificateStatus>,
}

#[derive(Debug, Deserialize)]
pub struct IssueRequest {
    pub asistencia_id: i64,
    pub url_pdf: Option<String>,
}

pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Next code in the `CERT-YYYY-NNN` series; the sequence widens past 999
/// rather than wrapping.
pub fn next_code(year: i32, last_sequence: Option<i64>) -> String {
    format!("CERT-{:04}-{:03}", year, last_sequence.unwrap_or(0) + 1)
}

pub async fn list_certificates(
    pool: &SqlitePool,
    query: &CertificateQuery,
) -> AppResult<Vec<CertificateRow>> {
    Ok(certificate_repo::list_certificates(pool, query.estado).await?)
}

/// Public lookup. Only an `emitido` certificate is valid; a pending or
/// rejected one is still returned so the caller can show why.
pub async fn check_code(pool: &SqlitePool, raw: &str) -> AppResult<CodeCheck> {
    let codigo = normalize_code(raw);
    let certificado = certificate_repo::load_certificate_by_code(pool, &codigo).await?;
    let valido = certificado
        .as_ref()
        .is_some_and(|c| c.estado == CertificateStatus::Emitido);

    Ok(CodeCheck {
        valido,
        codigo,
        certificado,
    })
}

pub async fn issue_certificate(pool: &SqlitePool, req: IssueRequest) -> AppResult<CertificateRow> {
    let today = Local::now().date_naive();
    // Takes the write lock up front so the sequence read and the insert
    // cannot interleave with another issuance.
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    match certificate_repo::load_attendance_presence(&mut *tx, req.asistencia_id).await? {
        None => return Err(AppError::NotFound("asistencia")),
        Some(false) => {
            return Err(AppError::conflict(
                "solo se certifica una asistencia marcada como presente",
            ))
        }
        Some(true) => {}
    }

    let last = certificate_repo::max_sequence_for_year(&mut *tx, today.year()).await?;
    let codigo = next_code(today.year(), last);

    let inserted = certificate_repo::insert_certificate(
        &mut *tx,
        NewCertificate {
            codigo_validacion: &codigo,
            asistencia_id: req.asistencia_id,
            estado: CertificateStatus::Emitido,
            fecha_emision: Some(today),
            url_pdf: clean(req.url_pdf.as_deref()),
        },
    )
    .await;
    match inserted {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) && violates_column(&e, "asistencia_id") => {
            warn!("Attendance {} already has a certificate", req.asistencia_id);
            return Err(AppError::conflict("la asistencia ya tiene un certificado"));
        }
        Err(e) if is_unique_violation(&e) => {
            warn!("Certificate code {} is already taken", codigo);
            return Err(AppError::conflict(format!("el código {} ya está en uso", codigo)));
        }
        Err(e) => return Err(e.into()),
    }

    tx.commit().await?;
    info!("Issued {} for attendance {}", codigo, req.asistencia_id);

    certificate_repo::load_certificate_by_code(pool, &codigo)
        .await?
        .ok_or(AppError::NotFound("certificado"))
}

// SQLite names the offending column: "UNIQUE constraint failed: certificado.asistencia_id".
fn violates_column(err: &sqlx::Error, column: &str) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.message().ends_with(&format!(".{column}")))
}

pub async fn certificate_stats(pool: &SqlitePool) -> AppResult<CertificateStats> {
    let mut stats = CertificateStats::default();
    for (estado, count) in certificate_repo::count_certificates_by_status(pool).await? {
        stats.total += count;
        match estado.parse::<CertificateStatus>() {
            Ok(CertificateStatus::Emitido) => stats.emitidos += count,
            Ok(CertificateStatus::Pendiente) => stats.pendientes += count,
            Ok(CertificateStatus::Rechazado) => stats.rechazados += count,
            Err(e) => warn!("Skipping certificates with {}", e),
        }
    }
    Ok(stats)
}
