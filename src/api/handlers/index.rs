//! Liveness banner.

/// `GET /`
///
/// Returns `LinkShortener v<crate version>` as plain text.
pub async fn index_handler() -> String {
    format!("LinkShortener v{}", env!("CARGO_PKG_VERSION"))
}
