use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::services::activity_service::{
    self, ActivityView, CreateActivityRequest, UpdateActivityRequest,
};
use crate::web::extract::{ApiJson, ApiPath};

pub async fn list_handler(State(pool): State<SqlitePool>) -> AppResult<Json<Vec<ActivityView>>> {
    Ok(Json(activity_service::list_activities(&pool).await?))
}

pub async fn detail_handler(
    ApiPath(id): ApiPath<i64>,
    State(pool): State<SqlitePool>,
) -> AppResult<Json<ActivityView>> {
    Ok(Json(activity_service::load_activity_view(&pool, id).await?))
}

pub async fn create_handler(
    State(pool): State<SqlitePool>,
    ApiJson(req): ApiJson<CreateActivityRequest>,
) -> AppResult<(StatusCode, Json<ActivityView>)> {
    let view = activity_service::create_activity(&pool, req).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn update_handler(
    ApiPath(id): ApiPath<i64>,
    State(pool): State<SqlitePool>,
    ApiJson(req): ApiJson<UpdateActivityRequest>,
) -> AppResult<Json<ActivityView>> {
    Ok(Json(activity_service::update_activity(&pool, id, req).await?))
}

pub async fn delete_handler(
    ApiPath(id): ApiPath<i64>,
    State(pool): State<SqlitePool>,
) -> AppResult<Json<Value>> {
    activity_service::delete_activity(&pool, id).await?;
    Ok(Json(json!({ "message": "actividad eliminada" })))
}
