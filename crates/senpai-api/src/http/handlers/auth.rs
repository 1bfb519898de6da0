//! Login, logout, and current-user handlers.

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use senpai_core::auth::session::Session;
use senpai_types::user::LoginRequest;

use crate::http::error::AppError;
use crate::http::extractors::session::{session_token, CurrentUser, SESSION_COOKIE};
use crate::state::AppState;

/// POST /api/login - Verify credentials and establish a session.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if body.username.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(
            "username and password are required".to_string(),
        ));
    }

    let session = state
        .auth_service
        .login(&body.username, &body.password)
        .await?;

    Ok((
        [(header::SET_COOKIE, session_cookie(&session))],
        Json(json!({ "message": "Logged in successfully" })),
    ))
}

/// POST /api/logout - Destroy the session server-side and expire the cookie.
///
/// Always succeeds: logging out without a session is a no-op.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.auth_service.logout(&token);
    }

    (
        [(header::SET_COOKIE, clear_cookie())],
        Json(json!({ "message": "Logged out successfully" })),
    )
}

/// GET /api/user - Return the current session's user id.
pub async fn current_user(user: CurrentUser) -> Json<serde_json::Value> {
    Json(json!({ "id": user.0.id }))
}

/// Build the Set-Cookie value for a freshly issued session.
///
/// HttpOnly keeps the token away from page scripts; the Max-Age mirrors the
/// server-side expiry so the browser drops the cookie around the same time
/// the store does.
fn session_cookie(session: &Session) -> String {
    let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
    format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}",
        session.token
    )
}

/// Build the Set-Cookie value that expires the session cookie.
fn clear_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
