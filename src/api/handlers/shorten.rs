//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::link::{LinkResponse, ShortenRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /shorten` (session required)
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "short_path": "my-link",     // optional, >= 3 chars to take effect
///   "expiration_time": 1767225600 // optional, unix seconds
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "url": "https://example.com", "short_path": "my-link", "expiration_time": 1767225600 }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for malformed JSON, an invalid URL, an invalid
/// custom code, or a custom code that is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<LinkResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .allocate(
            payload.short_path,
            payload.url,
            payload.expiration_time.unwrap_or(0),
        )
        .await?;

    Ok(Json(link.into()))
}
