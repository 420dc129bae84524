//! Handlers for link listing and deletion.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde_json::json;

use crate::api::dto::auth::MessageResponse;
use crate::api::dto::pagination::{LinkListResponse, PaginationMeta, PaginationParams};
use crate::error::AppError;
use crate::state::AppState;

/// Lists stored links, oldest first.
///
/// # Endpoint
///
/// `GET /links?page=1&per_page=32` (session required)
///
/// Expired links that were never resolved since expiring are still listed.
///
/// # Errors
///
/// Returns 400 Bad Request if `page` is 0 or `per_page` is outside 1..=1000.
pub async fn list_links_handler(
    State(state): State<AppState>,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<LinkListResponse>, AppError> {
    let Query(params) = query?;

    let (page, per_page) = params
        .validate_and_get_page()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (links, total) = state.link_service.list_links(page, per_page).await?;

    Ok(Json(LinkListResponse {
        pagination: PaginationMeta::new(page, per_page, total),
        items: links.into_iter().map(Into::into).collect(),
    }))
}

/// Permanently deletes a short link.
///
/// # Endpoint
///
/// `DELETE /{code}` (session required)
///
/// # Errors
///
/// Returns 404 Not Found if no link has this code.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(Json(MessageResponse::new("link deleted")))
}
