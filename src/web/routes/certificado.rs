use axum::{extract::State, http::StatusCode, Json};
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::CertificateRow;
use crate::services::certificate_service::{
    self, CertificateQuery, CertificateStats, CodeCheck, IssueRequest,
};
use crate::web::extract::{ApiJson, ApiPath, ApiQuery};

pub async fn list_handler(
    ApiQuery(query): ApiQuery<CertificateQuery>,
    State(pool): State<SqlitePool>,
) -> AppResult<Json<Vec<CertificateRow>>> {
    Ok(Json(
        certificate_service::list_certificates(&pool, &query).await?,
    ))
}

/// Public validator. An unknown code is a normal answer (`valido: false`),
/// not a 404.
pub async fn validate_handler(
    ApiPath(codigo): ApiPath<String>,
    State(pool): State<SqlitePool>,
) -> AppResult<Json<CodeCheck>> {
    Ok(Json(certificate_service::check_code(&pool, &codigo).await?))
}

pub async fn issue_handler(
    State(pool): State<SqlitePool>,
    ApiJson(req): ApiJson<IssueRequest>,
) -> AppResult<(StatusCode, Json<CertificateRow>)> {
    let certificate = certificate_service::issue_certificate(&pool, req).await?;
    Ok((StatusCode::CREATED, Json(certificate)))
}

pub async fn stats_handler(State(pool): State<SqlitePool>) -> AppResult<Json<CertificateStats>> {
    Ok(Json(certificate_service::certificate_stats(&pool).await?))
}
