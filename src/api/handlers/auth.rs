//! Handlers for login, session echo and logout.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, MessageResponse, SessionResponse};
use crate::api::middleware::auth::{clear_session_cookie, session_cookie};
use crate::domain::entities::Session;
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges credentials for a session cookie.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Request Body
///
/// ```json
/// { "username": "admin", "password": "secret" }
/// ```
///
/// On success sets `LinkSession=<token>` (HttpOnly, SameSite=Lax).
///
/// # Errors
///
/// Returns 400 Bad Request with `invalid_credentials` for an unknown user or
/// wrong password. Both cases share one message.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let session = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    let cookie = session_cookie(
        &session.token,
        state.auth_service.session_ttl().num_seconds(),
        state.cookie_secure,
    );

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("logged in successfully")),
    ))
}

/// Echoes the current session.
///
/// # Endpoint
///
/// `GET /user` (session required)
pub async fn user_handler(Extension(session): Extension<Session>) -> Json<SessionResponse> {
    Json(session.into())
}

/// Ends the current session and clears the cookie.
///
/// # Endpoint
///
/// `GET /logout` (session required)
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, AppError> {
    state.auth_service.logout(&session).await?;

    Ok((
        [(header::SET_COOKIE, clear_session_cookie(state.cookie_secure))],
        Json(MessageResponse::new("logged out successfully")),
    ))
}
