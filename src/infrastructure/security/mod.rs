//! Password hashing backends.

pub mod argon2_verifier;

pub use argon2_verifier::Argon2Verifier;
