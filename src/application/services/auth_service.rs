//! Session authentication service: login, per-request authentication, logout.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::credentials::CredentialVerifier;
use crate::domain::entities::{NewSession, NewUser, Session, User};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::error::AppError;
use crate::utils::session_token::generate_session_token;

type HmacSha256 = Hmac<Sha256>;

/// Message shared by unknown-username and wrong-password failures.
const INVALID_CREDENTIALS: &str = "invalid username or password";

/// Well-formed Argon2id hash (default parameters) that matches no password.
/// Verified against on unknown usernames so both failure paths cost one hash.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Service gating privileged operations behind opaque session tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison, so read access to the session table does not yield usable
/// tokens.
///
/// Only "authenticated or not" is decided here; `is_admin` is carried on the
/// identity but not enforced.
pub struct AuthService<S, U, C>
where
    S: SessionRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: CredentialVerifier + ?Sized,
{
    session_repository: Arc<S>,
    user_repository: Arc<U>,
    verifier: Arc<C>,
    signing_secret: String,
    session_ttl: Duration,
}

impl<S, U, C> AuthService<S, U, C>
where
    S: SessionRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: CredentialVerifier + ?Sized,
{
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `signing_secret` - HMAC key; must stay stable for sessions to survive restarts
    /// - `session_ttl` - lifetime of a newly created session
    pub fn new(
        session_repository: Arc<S>,
        user_repository: Arc<U>,
        verifier: Arc<C>,
        signing_secret: String,
        session_ttl: Duration,
    ) -> Self {
        Self {
            session_repository,
            user_repository,
            verifier,
            signing_secret,
            session_ttl,
        }
    }

    /// Lifetime granted to new sessions.
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Resolves a presented token to its session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with `"not logged in"` when no token
    /// is presented, and `"invalid session"` when the token matches no live
    /// session. Expired sessions are deleted on sight.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<Session, AppError> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Err(AppError::unauthorized("not logged in", json!({})));
        };

        let token_hash = self.hash_token(token);

        let Some(record) = self
            .session_repository
            .find_by_token_hash(&token_hash)
            .await?
        else {
            return Err(AppError::unauthorized("invalid session", json!({})));
        };

        if record.is_expired() {
            debug!(user = %record.user.username, "Rejecting expired session");
            if let Err(e) = self.session_repository.delete(&token_hash).await {
                warn!(error = %e, "Failed to remove expired session");
            }
            return Err(AppError::unauthorized("invalid session", json!({})));
        }

        Ok(record.into_session(token.to_string()))
    }

    /// Verifies credentials and opens a new session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCredentials`] for an unknown username or a
    /// wrong password, with the same message in both cases.
    ///
    /// Returns [`AppError::Internal`] on database or RNG errors.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        let Some(user) = self.user_repository.find_by_username(username).await? else {
            self.verifier.verify_password(password, DUMMY_PASSWORD_HASH);
            warn!(username, "Login failed: unknown user");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        };

        if !self.verifier.verify_password(password, &user.password_hash) {
            warn!(username, "Login failed: wrong password");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        }

        let token = generate_session_token()?;
        let expires_at = Utc::now() + self.session_ttl;

        self.session_repository
            .create(NewSession {
                token_hash: self.hash_token(&token),
                user_id: user.id,
                expires_at,
            })
            .await
            .map_err(|e| {
                if e.is_already_exists() {
                    AppError::internal("could not create session", json!({}))
                } else {
                    e
                }
            })?;

        info!(username, "User logged in");

        Ok(Session {
            token,
            user,
            expires_at,
        })
    }

    /// Destroys a session. Clearing the client-held token is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn logout(&self, session: &Session) -> Result<(), AppError> {
        let removed = self
            .session_repository
            .delete(&self.hash_token(&session.token))
            .await?;

        info!(user = %session.user.username, removed, "User logged out");
        Ok(())
    }

    /// Seeds a user account, hashing the password with the credential verifier.
    ///
    /// Used by the `admin` binary only; there is no HTTP route for it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty username or password.
    /// Returns [`AppError::AlreadyExists`] if the username is taken.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register_user(
        &self,
        username: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<User, AppError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::bad_request(
                "username and password must not be empty",
                json!({}),
            ));
        }

        let password_hash = self.verifier.hash_password(password)?;

        self.user_repository
            .create(NewUser {
                username: username.to_string(),
                password_hash,
                is_admin,
            })
            .await
    }
}
