//! DTOs for link creation and listing.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Redirect target. Checked for well-formedness by the allocator.
    #[validate(length(min = 1, message = "url is required"))]
    pub url: String,

    /// Custom short code. Values shorter than 3 characters are ignored.
    #[serde(default)]
    pub short_path: Option<String>,

    /// Unix seconds; `0` or absent means the link never expires.
    #[serde(default)]
    pub expiration_time: Option<i64>,
}

/// JSON shape of a stored link.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkResponse {
    pub url: String,
    pub short_path: String,
    pub expiration_time: i64,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            url: link.url,
            short_path: link.short_path,
            expiration_time: link.expiration_time,
        }
    }
}
