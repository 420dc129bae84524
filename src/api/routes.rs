//! API route configuration.
//!
//! Routes are split by whether they need a session; protected routes are
//! wrapped with [`crate::api::middleware::auth`] by the caller.

use crate::api::handlers::{
    delete_link_handler, health_handler, index_handler, list_links_handler, login_handler,
    logout_handler, redirect_handler, shorten_handler, user_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{MethodRouter, delete, get, post},
};

/// Routes reachable without a session.
///
/// # Endpoints
///
/// - `GET  /`       - Liveness banner
/// - `GET  /health` - Database health check
/// - `POST /login`  - Exchange credentials for a session cookie
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/login", post(login_handler))
}

/// Routes that require a session.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short link
/// - `GET  /user`    - Echo the current session
/// - `GET  /links`   - Paginated link listing
/// - `GET  /logout`  - End the current session
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/user", get(user_handler))
        .route("/links", get(list_links_handler))
        .route("/logout", get(logout_handler))
}

/// Public redirect on `GET /{code}`.
pub fn redirect_route() -> MethodRouter<AppState> {
    get(redirect_handler)
}

/// Link deletion on `DELETE /{code}`; shares its path with the redirect.
pub fn delete_route() -> MethodRouter<AppState> {
    delete(delete_link_handler)
}
