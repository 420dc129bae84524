//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /`        - Liveness banner (public)
//! - `GET    /health`  - Database health check (public)
//! - `POST   /login`   - Session login (public)
//! - `GET    /{code}`  - Short link redirect (public)
//! - `DELETE /{code}`  - Delete a link (session)
//! - `POST   /shorten`, `GET /user`, `GET /links`, `GET /logout` (session)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Session cookie or Bearer token
//! - **Path normalization** - Trailing slash handling

use crate::api::middleware::{auth, tracing};
use crate::api::routes;
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// The routed application without path normalization.
///
/// `GET /{code}` and `DELETE /{code}` share one path; the session check is
/// attached to the `DELETE` method only.
pub fn router(state: AppState) -> Router {
    let auth_layer = middleware::from_fn_with_state(state.clone(), auth::layer);

    let protected = routes::protected_routes().route_layer(auth_layer.clone());

    let code_route = routes::redirect_route().merge(routes::delete_route().route_layer(auth_layer));

    Router::new()
        .merge(routes::public_routes())
        .merge(protected)
        .route("/{code}", code_route)
        .with_state(state)
        .layer(tracing::layer())
}
