//! Opaque session token generation.

use base64::Engine as _;
use serde_json::json;

use crate::error::AppError;

/// Number of random bytes in a session token (256 bits).
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Generates a cryptographically secure, URL-safe session token.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 43-character token. The token carries no
/// user data.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn generate_session_token() -> Result<String, AppError> {
    let mut buffer = [0u8; SESSION_TOKEN_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        tracing::error!(error = %e, "System RNG failure");
        AppError::internal("could not create session", json!({}))
    })?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}
