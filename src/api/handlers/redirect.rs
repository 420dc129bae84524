//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::redirect_location;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Answers `308 Permanent Redirect` with `Location` set to the stored URL,
/// percent-encoded if it contains non-ASCII characters.
/// Expired links are removed on the way and reported like unknown ones.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let url = state.link_service.resolve(&code).await?;

    Ok(Redirect::permanent(&redirect_location(&url)))
}
