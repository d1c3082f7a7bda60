use axum::{extract::State, Json};
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::services::dashboard_service::{self, Dashboard};

pub async fn dashboard_handler(State(pool): State<SqlitePool>) -> AppResult<Json<Dashboard>> {
    Ok(Json(dashboard_service::load_dashboard(&pool).await?))
}
