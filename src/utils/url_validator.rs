//! Target URL validation.
//!
//! Targets are stored exactly as submitted; validation only decides whether
//! the string is an absolute URI that can be sent back in a `Location` header.
//! [`redirect_location`] turns a stored target into an ASCII header value.

use std::borrow::Cow;
use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must not contain whitespace or control characters")]
    IllegalCharacters,
}

/// Checks that `input` is an absolute, well-formed URI.
///
/// Any scheme is accepted. Leading/trailing whitespace and control characters
/// are rejected rather than silently stripped, since the stored value must be
/// usable verbatim as a header value.
///
/// # Errors
///
/// Returns [`UrlValidationError::IllegalCharacters`] for untrimmed input or
/// control characters, and [`UrlValidationError::InvalidFormat`] for relative
/// or malformed URLs.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_target_url("https://example.com").is_ok());
/// assert!(validate_target_url("/relative/path").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim() != input || input.chars().any(char::is_control) {
        return Err(UrlValidationError::IllegalCharacters);
    }

    Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    Ok(())
}

/// Returns the `Location` value for a stored target.
///
/// ASCII targets are returned verbatim. Non-ASCII ones are re-serialized by
/// [`Url`], which percent-encodes the path and query and punycodes the host.
/// A target that no longer parses is returned as stored.
pub fn redirect_location(stored: &str) -> Cow<'_, str> {
    if stored.is_ascii() {
        return Cow::Borrowed(stored);
    }

    match Url::parse(stored) {
        Ok(url) => Cow::Owned(url.into()),
        Err(_) => Cow::Borrowed(stored),
    }
}
