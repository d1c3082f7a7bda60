use axum::{extract::State, http::StatusCode, Extension, Json};
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::InscriptionRow;
use crate::services::registration_service::{self, InscriptionQuery};
use crate::web::extract::{ApiPath, ApiQuery};
use crate::web::middleware::auth::CurrentSession;

pub async fn list_handler(
    ApiQuery(query): ApiQuery<InscriptionQuery>,
    State(pool): State<SqlitePool>,
) -> AppResult<Json<Vec<InscriptionRow>>> {
    Ok(Json(
        registration_service::list_inscriptions(&pool, &query).await?,
    ))
}

pub async fn register_handler(
    Extension(session): Extension<CurrentSession>,
    ApiPath(id_actividad): ApiPath<i64>,
    State(pool): State<SqlitePool>,
) -> AppResult<(StatusCode, Json<InscriptionRow>)> {
    let inscription =
        registration_service::register_for_activity(&pool, &session.user, id_actividad).await?;
    Ok((StatusCode::CREATED, Json(inscription)))
}
