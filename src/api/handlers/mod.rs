//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
pub mod index;
pub mod links;
pub mod redirect;
pub mod shorten;

pub use auth::{login_handler, logout_handler, user_handler};
pub use health::health_handler;
pub use index::index_handler;
pub use links::{delete_link_handler, list_links_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
