use axum::{extract::State, http::StatusCode, Json};
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::AttendanceRow;
use crate::services::attendance_service::{
    self, AttendanceQuery, AttendanceSummary, RecordAttendanceRequest,
};
use crate::web::extract::{ApiJson, ApiPath, ApiQuery};

pub async fn list_handler(
    ApiQuery(query): ApiQuery<AttendanceQuery>,
    State(pool): State<SqlitePool>,
) -> AppResult<Json<Vec<AttendanceRow>>> {
    Ok(Json(attendance_service::list_attendance(&pool, &query).await?))
}

pub async fn record_handler(
    State(pool): State<SqlitePool>,
    ApiJson(req): ApiJson<RecordAttendanceRequest>,
) -> AppResult<(StatusCode, Json<AttendanceRow>)> {
    let row = attendance_service::record_attendance(&pool, req).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn toggle_handler(
    ApiPath(id): ApiPath<i64>,
    State(pool): State<SqlitePool>,
) -> AppResult<Json<AttendanceRow>> {
    Ok(Json(attendance_service::toggle_attendance(&pool, id).await?))
}

pub async fn summary_handler(
    ApiQuery(query): ApiQuery<AttendanceQuery>,
    State(pool): State<SqlitePool>,
) -> AppResult<Json<AttendanceSummary>> {
    Ok(Json(attendance_service::summary(&pool, &query).await?))
}
