//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Uniqueness of `short_path` is enforced by the store itself: callers never
/// check for an existing code before inserting, they insert and react to
/// [`AppError::AlreadyExists`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Atomically inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] if the short code is already taken.
    /// Returns [`AppError::Internal`] on any other database error.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its exact short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Deletes a link by its short code.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if no link matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Deletes a link only if it is still expired as of `now` (Unix seconds).
    ///
    /// The expiry condition is checked in the same statement as the delete,
    /// so a link re-created under the same code after an earlier sweep is
    /// left alone. Returns `Ok(true)` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_expired(&self, code: &str, now: i64) -> Result<bool, AppError>;

    /// Lists links in insertion order.
    ///
    /// Expired links that were never resolved are still returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Link>, AppError>;

    /// Counts all stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
