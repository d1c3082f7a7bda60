use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use cookie::{Cookie, SameSite};
use serde_json::json;
use tracing::info;

use crate::error::AppResult;
use crate::models::UserRow;
use crate::services::auth_service::{self, LoginRequest, SessionView, SignupRequest};
use crate::web::extract::ApiJson;
use crate::web::middleware::auth::{CurrentSession, SESSION_COOKIE};
use crate::web::AppState;

// Browser-session cookie; expiry is enforced server-side by the session row.
fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

fn with_session_cookie(status: StatusCode, session: SessionView) -> Response {
    let cookie = session_cookie(session.token.clone());
    (
        status,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(session),
    )
        .into_response()
}

pub async fn signup_handler(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> AppResult<Response> {
    let session = auth_service::signup(&state.pool, state.config.session_ttl_hours, req).await?;
    Ok(with_session_cookie(StatusCode::CREATED, session))
}

pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AppResult<Response> {
    let session = auth_service::login(&state.pool, state.config.session_ttl_hours, req).await?;
    info!("User {} logged in", session.usuario.id_usuario);
    Ok(with_session_cookie(StatusCode::OK, session))
}

pub async fn logout_handler(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
) -> AppResult<Response> {
    auth_service::logout(&state.pool, &session.token).await?;
    info!("User {} logged out", session.user.id_usuario);

    let mut cleared = Cookie::new(SESSION_COOKIE, "");
    cleared.set_path("/");
    cleared.set_http_only(true);
    cleared.set_same_site(SameSite::Lax);
    cleared.make_removal();

    Ok((
        [(header::SET_COOKIE, cleared.to_string())],
        Json(json!({ "message": "sesión cerrada" })),
    )
        .into_response())
}

pub async fn me_handler(Extension(session): Extension<CurrentSession>) -> Json<UserRow> {
    Json(session.user)
}
