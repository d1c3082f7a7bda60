use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::UserRow;
use crate::services::user_service::{self, CreateUserRequest, UpdateUserRequest};
use crate::web::extract::{ApiJson, ApiPath};

pub async fn list_handler(State(pool): State<SqlitePool>) -> AppResult<Json<Vec<UserRow>>> {
    Ok(Json(user_service::list_users(&pool).await?))
}

pub async fn detail_handler(
    ApiPath(id): ApiPath<i64>,
    State(pool): State<SqlitePool>,
) -> AppResult<Json<UserRow>> {
    Ok(Json(user_service::load_user(&pool, id).await?))
}

pub async fn create_handler(
    State(pool): State<SqlitePool>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserRow>)> {
    let user = user_service::create_user(&pool, req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_handler(
    ApiPath(id): ApiPath<i64>,
    State(pool): State<SqlitePool>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> AppResult<Json<UserRow>> {
    Ok(Json(user_service::update_user(&pool, id, req).await?))
}

pub async fn delete_handler(
    ApiPath(id): ApiPath<i64>,
    State(pool): State<SqlitePool>,
) -> AppResult<Json<Value>> {
    user_service::delete_user(&pool, id).await?;
    Ok(Json(json!({ "message": "usuario eliminado" })))
}
