//! Short code generation and validation utilities.
//!
//! Random codes are drawn from an instance-owned RNG so that each allocator
//! carries its own seed and tests can reproduce a sequence exactly.

use std::sync::{LazyLock, Mutex};

use rand::{Rng, SeedableRng, rngs::StdRng};
use regex::Regex;
use serde_json::json;

use crate::error::AppError;

/// Symbols a random code is drawn from (64 entries, all URL-safe).
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_";

/// Length of generated codes.
pub const RANDOM_CODE_LENGTH: usize = 3;

/// Requested codes shorter than this are ignored and a random code is used.
pub const MIN_CUSTOM_CODE_LENGTH: usize = 3;

/// Longest custom code accepted.
pub const MAX_CUSTOM_CODE_LENGTH: usize = 64;

/// Paths owned by routes; a link with one of these codes could never resolve.
const RESERVED_CODES: &[&str] = &["shorten", "login", "logout", "user", "links", "health"];

static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/?#%\s]+$").expect("static regex is valid"));

/// Random short code source.
///
/// The RNG sits behind a mutex that is held only while drawing a single code,
/// never across an await point.
pub struct CodeGenerator {
    rng: Mutex<StdRng>,
    length: usize,
}

impl CodeGenerator {
    /// Creates a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a generator with a fixed seed; identical seeds yield identical sequences.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            length: RANDOM_CODE_LENGTH,
        }
    }

    /// Draws a new code uniformly from [`ALPHABET`].
    pub fn generate(&self) -> String {
        // Poisoning leaves the RNG state intact.
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Returns true if a requested code is long enough to be treated as custom.
pub fn is_custom_code(requested: &str) -> bool {
    requested.chars().count() >= MIN_CUSTOM_CODE_LENGTH
}

/// Validates a caller-supplied custom short code.
///
/// # Rules
///
/// - At most 64 characters
/// - No `/`, `?`, `#`, `%` or whitespace
/// - Not a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.chars().count() > MAX_CUSTOM_CODE_LENGTH {
        return Err(AppError::bad_request(
            "Custom code must be at most 64 characters",
            json!({ "provided_length": code.chars().count() }),
        ));
    }

    if !CUSTOM_CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "Custom code cannot contain '/', '?', '#', '%' or whitespace",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
