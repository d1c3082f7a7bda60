use axum::{extract::State, Json};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct HealthView {
    pub status: &'static str,
    pub database: bool,
    pub version: &'static str,
    pub build: &'static str,
}

// Always 200; a failing database shows up in the body so the process is
// still reported alive.
pub async fn health_handler(State(pool): State<SqlitePool>) -> Json<HealthView> {
    let database = match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => true,
        Err(e) => {
            warn!("Health check could not reach the database: {}", e);
            false
        }
    };

    Json(HealthView {
        status: if database { "ok" } else { "degraded" },
        database,
        version: env!("CARGO_PKG_VERSION"),
        build: env!("SIGEA_BUILD_ID"),
    })
}
