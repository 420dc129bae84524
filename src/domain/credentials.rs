//! Password hashing capability consumed by the session authenticator.

use crate::error::AppError;

/// Hashes and verifies account passwords.
///
/// Implementations must produce self-describing hashes (salt and parameters
/// embedded) so that `verify_password` needs nothing but the stored string.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier: Send + Sync {
    /// Hashes a plaintext password for storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if hashing fails.
    fn hash_password(&self, plain: &str) -> Result<String, AppError>;

    /// Returns true if `plain` matches `hash`.
    ///
    /// A malformed stored hash is treated as a mismatch.
    fn verify_password(&self, plain: &str, hash: &str) -> bool;
}
