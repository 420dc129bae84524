//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access. Concrete implementations live in
//! `crate::infrastructure::persistence`; mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link storage
//! - [`UserRepository`] - Account lookup and seeding
//! - [`SessionRepository`] - Login session storage

pub mod link_repository;
pub mod session_repository;
pub mod user_repository;

pub use link_repository::LinkRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
