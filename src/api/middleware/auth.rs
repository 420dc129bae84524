//! Session authentication middleware and cookie helpers.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "LinkSession";

/// Authenticates requests by session token.
///
/// # Token Sources
///
/// 1. `Cookie: LinkSession=<token>`
/// 2. `Authorization: Bearer <token>` when no session cookie is sent
///
/// On success the resolved [`crate::domain::entities::Session`] is inserted
/// into request extensions for handlers to extract with `Extension<Session>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` with message:
/// - `not logged in` if neither source carries a token
/// - `invalid session` if the token is unknown or expired
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/user", get(user_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match session_token_from_cookie(&parts.headers) {
        Some(token) => Some(token),
        None => AuthBearer::from_request_parts(&mut parts, &())
            .await
            .ok()
            .map(|AuthBearer(token)| token),
    };

    let session = st.auth_service.authenticate(token.as_deref()).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

/// Extracts the session token from the `Cookie` header.
///
/// Handles multiple cookies in one header; empty values count as absent.
pub fn session_token_from_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                match cookie.trim().split_once('=') {
                    Some((SESSION_COOKIE, value)) if !value.is_empty() => Some(value.to_string()),
                    _ => None,
                }
            })
        })
}

/// Builds the `Set-Cookie` value issued on login.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds the `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}
