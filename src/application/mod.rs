//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and business rules, and
//! expose a clean API to the HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short-code allocation, resolution with lazy expiry, listing and deletion
//! - [`services::auth_service::AuthService`] - Login, session authentication and logout

pub mod services;
