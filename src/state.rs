//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::domain::credentials::CredentialVerifier;
use crate::domain::repositories::{LinkRepository, SessionRepository, UserRepository};

/// Link service over a type-erased repository.
pub type SharedLinkService = LinkService<dyn LinkRepository>;

/// Auth service over type-erased repositories and verifier.
pub type SharedAuthService =
    AuthService<dyn SessionRepository, dyn UserRepository, dyn CredentialVerifier>;

/// State cloned into each request.
///
/// Services are behind `Arc`, so cloning is a handful of reference count bumps.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<SharedLinkService>,
    pub auth_service: Arc<SharedAuthService>,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(
        link_service: Arc<SharedLinkService>,
        auth_service: Arc<SharedAuthService>,
        cookie_secure: bool,
    ) -> Self {
        Self {
            link_service,
            auth_service,
            cookie_secure,
        }
    }
}
