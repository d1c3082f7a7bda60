use axum::{extract::State, Json};
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::services::activity_service::{self, ActivityView, CatalogPage, CatalogQuery};
use crate::web::extract::{ApiPath, ApiQuery};

pub async fn catalog_handler(
    ApiQuery(query): ApiQuery<CatalogQuery>,
    State(pool): State<SqlitePool>,
) -> AppResult<Json<CatalogPage>> {
    Ok(Json(activity_service::catalog_page(&pool, &query).await?))
}

pub async fn detail_handler(
    ApiPath(id): ApiPath<i64>,
    State(pool): State<SqlitePool>,
) -> AppResult<Json<ActivityView>> {
    Ok(Json(activity_service::load_activity_view(&pool, id).await?))
}
