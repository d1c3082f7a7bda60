use axum::{extract::State, http::StatusCode, Json};
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::PaymentRow;
use crate::services::payment_service::{
    self, ManualPaymentRequest, PaymentLedger, PaymentQuery, StatusChangeRequest,
};
use crate::web::extract::{ApiJson, ApiPath, ApiQuery};

pub async fn list_handler(
    ApiQuery(query): ApiQuery<PaymentQuery>,
    State(pool): State<SqlitePool>,
) -> AppResult<Json<PaymentLedger>> {
    Ok(Json(payment_service::list_payments(&pool, &query).await?))
}

pub async fn detail_handler(
    ApiPath(id): ApiPath<i64>,
    State(pool): State<SqlitePool>,
) -> AppResult<Json<PaymentRow>> {
    Ok(Json(payment_service::load_payment(&pool, id).await?))
}

pub async fn create_handler(
    State(pool): State<SqlitePool>,
    ApiJson(req): ApiJson<ManualPaymentRequest>,
) -> AppResult<(StatusCode, Json<PaymentRow>)> {
    let payment = payment_service::register_manual_payment(&pool, req).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn status_handler(
    ApiPath(id): ApiPath<i64>,
    State(pool): State<SqlitePool>,
    ApiJson(req): ApiJson<StatusChangeRequest>,
) -> AppResult<Json<PaymentRow>> {
    Ok(Json(
        payment_service::change_status(&pool, id, req.estado).await?,
    ))
}
