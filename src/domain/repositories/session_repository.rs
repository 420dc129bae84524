//! Repository trait for login sessions.

use crate::domain::entities::{NewSession, SessionRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for session storage.
///
/// Sessions are keyed by the keyed hash of their bearer token; raw tokens are
/// never persisted.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persists a new session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] on a token hash collision.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_session: NewSession) -> Result<(), AppError>;

    /// Finds a session by token hash, eagerly loading its user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_token_hash(&self, token_hash: &str)
    -> Result<Option<SessionRecord>, AppError>;

    /// Deletes a session. Returns `Ok(false)` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, token_hash: &str) -> Result<bool, AppError>;
}
