//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL mapping
//! - [`User`] - An account able to log in
//! - [`Session`] - An authenticated login session
//!
//! Creation payloads live next to their entity (`NewLink`, `NewUser`,
//! `NewSession`).

pub mod link;
pub mod session;
pub mod user;

pub use link::{Link, NEVER_EXPIRES, NewLink, normalize_expiration};
pub use session::{NewSession, Session, SessionRecord};
pub use user::{NewUser, User};
