use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;

pub mod extract;
pub mod middleware;
pub mod routes;

use self::middleware::auth as auth_middleware;
use self::routes::{
    actividad, asistencia, auth, certificado, dashboard, eventos, health, inscripcion, pago,
    usuario,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        AppState {
            pool,
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    // Routes that act on behalf of the signed-in user.
    let protected_routes = Router::new()
        .route("/api/auth/me", get(auth::me_handler))
        .route("/api/auth/logout", post(auth::logout_handler))
        .route(
            "/api/actividad/:id/inscripcion",
            post(inscripcion::register_handler),
        )
        .layer(from_fn_with_state(
            state.clone(),
            auth_middleware::require_session,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/auth/registro", post(auth::signup_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route(
            "/api/actividad",
            get(actividad::list_handler).post(actividad::create_handler),
        )
        .route(
            "/api/actividad/:id",
            get(actividad::detail_handler)
                .put(actividad::update_handler)
                .delete(actividad::delete_handler),
        )
        .route(
            "/api/usuario",
            get(usuario::list_handler).post(usuario::create_handler),
        )
        .route(
            "/api/usuario/:id",
            get(usuario::detail_handler)
                .put(usuario::update_handler)
                .delete(usuario::delete_handler),
        )
        .route("/api/inscripcion", get(inscripcion::list_handler))
        .route(
            "/api/pago",
            get(pago::list_handler).post(pago::create_handler),
        )
        .route("/api/pago/:id", get(pago::detail_handler))
        .route("/api/pago/:id/estado", put(pago::status_handler))
        .route(
            "/api/certificado",
            get(certificado::list_handler).post(certificado::issue_handler),
        )
        .route(
            "/api/certificado/validar/:codigo",
            get(certificado::validate_handler),
        )
        .route(
            "/api/certificado/estadisticas",
            get(certificado::stats_handler),
        )
        .route(
            "/api/asistencia",
            get(asistencia::list_handler).post(asistencia::record_handler),
        )
        .route("/api/asistencia/resumen", get(asistencia::summary_handler))
        .route("/api/asistencia/:id/toggle", put(asistencia::toggle_handler))
        .route("/api/eventos", get(eventos::catalog_handler))
        .route("/api/eventos/:id", get(eventos::detail_handler))
        .route("/api/dashboard", get(dashboard::dashboard_handler))
        .merge(protected_routes)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
