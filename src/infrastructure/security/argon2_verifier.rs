//! Argon2id implementation of the credential verifier.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde_json::json;

use crate::domain::credentials::CredentialVerifier;
use crate::error::AppError;

/// Hashes passwords with Argon2id (default parameters) and a random salt.
///
/// Hashes are PHC strings (`$argon2id$v=19$...`), so parameters travel with
/// the stored value.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Verifier;

impl Argon2Verifier {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialVerifier for Argon2Verifier {
    fn hash_password(&self, plain: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                AppError::internal("could not hash password", json!({}))
            })
    }

    fn verify_password(&self, plain: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            tracing::warn!("Stored password hash is not a valid PHC string");
            return false;
        };

        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
