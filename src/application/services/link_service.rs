//! Link allocation, resolution and management service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, is_custom_code, validate_custom_code};
use crate::utils::url_validator::validate_target_url;

/// Collision count after which every further retry is logged as a warning.
const COLLISION_WARN_THRESHOLD: u64 = 100;

/// Service for allocating, resolving and managing short links.
///
/// Code uniqueness relies solely on the repository's atomic insert: a taken
/// code surfaces as [`AppError::AlreadyExists`] from
/// [`LinkRepository::insert`], never from a prior lookup.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    code_generator: CodeGenerator,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service owning its own code generator.
    pub fn new(link_repository: Arc<L>, code_generator: CodeGenerator) -> Self {
        Self {
            link_repository,
            code_generator,
        }
    }

    /// Allocates a short code for `url` and persists the link.
    ///
    /// # Code Selection
    ///
    /// - A `requested_code` of 3 or more characters is a custom code: exactly
    ///   one insert is attempted.
    /// - Otherwise a random 3-character code is generated and the insert is
    ///   retried with a fresh code on every collision, without limit.
    ///
    /// Negative expirations are stored as `-1`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or custom code is invalid.
    /// Returns [`AppError::AlreadyExists`] if the custom code is taken.
    /// Returns [`AppError::Internal`] on any other storage failure.
    pub async fn allocate(
        &self,
        requested_code: Option<String>,
        url: String,
        expiration_time: i64,
    ) -> Result<Link, AppError> {
        validate_target_url(&url).map_err(|e| {
            AppError::bad_request("invalid url", json!({ "reason": e.to_string() }))
        })?;

        match requested_code.filter(|code| is_custom_code(code)) {
            Some(code) => self.insert_custom(code, url, expiration_time).await,
            None => self.insert_random(url, expiration_time).await,
        }
    }

    async fn insert_custom(
        &self,
        code: String,
        url: String,
        expiration_time: i64,
    ) -> Result<Link, AppError> {
        validate_custom_code(&code)?;

        let new_link = NewLink::new(code.clone(), url, expiration_time);

        self.link_repository
            .insert(new_link)
            .await
            .map_err(|e| {
                if e.is_already_exists() {
                    AppError::already_exists(
                        "link shortcut already exists",
                        json!({ "short_path": code }),
                    )
                } else {
                    e
                }
            })
    }

    async fn insert_random(&self, url: String, expiration_time: i64) -> Result<Link, AppError> {
        let mut collisions: u64 = 0;

        loop {
            let code = self.code_generator.generate();
            let new_link = NewLink::new(code, url.clone(), expiration_time);

            match self.link_repository.insert(new_link).await {
                Ok(link) => {
                    debug!(short_path = %link.short_path, collisions, "Allocated short code");
                    return Ok(link);
                }
                Err(e) if e.is_already_exists() => {
                    collisions += 1;
                    if collisions >= COLLISION_WARN_THRESHOLD {
                        warn!(collisions, "Short code space is congested, still retrying");
                    } else {
                        debug!(collisions, "Short code collision, retrying");
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Resolves a short code to its redirect target using the current time.
    ///
    /// See [`Self::resolve_at`].
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        self.resolve_at(code, Utc::now().timestamp()).await
    }

    /// Resolves a short code to its redirect target as of `now` (Unix seconds).
    ///
    /// An expired link is deleted and reported as not found. A non-expired
    /// hit costs exactly one point lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown or expired.
    /// Returns [`AppError::Internal`] on database errors during lookup.
    pub async fn resolve_at(&self, code: &str, now: i64) -> Result<String, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| invalid_shortcut(code))?;

        if link.is_expired_at(now) {
            info!(short_path = %code, expired_at = link.expiration_time, "Removing expired link");

            match self.link_repository.delete_expired(code, now).await {
                Ok(true) => {}
                Ok(false) => {
                    debug!(short_path = %code, "Expired link already swept or replaced");
                }
                Err(e) => {
                    warn!(error = %e, short_path = %code, "Failed to remove expired link");
                }
            }

            return Err(invalid_shortcut(code));
        }

        Ok(link.url)
    }

    /// Returns one page of links together with the total link count.
    ///
    /// `page` is 1-indexed. Pages past the end are empty, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_links(&self, page: i64, per_page: i64) -> Result<(Vec<Link>, i64), AppError> {
        let offset = (page - 1) * per_page;

        let total = self.link_repository.count().await?;
        let items = self.link_repository.list(offset, per_page).await?;

        Ok((items, total))
    }

    /// Deletes a link by code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !self.link_repository.delete(code).await? {
            return Err(invalid_shortcut(code));
        }

        info!(short_path = %code, "Link deleted");
        Ok(())
    }

    /// Counts stored links. Used by the health check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }
}

fn invalid_shortcut(code: &str) -> AppError {
    AppError::not_found("invalid link shortcut", json!({ "short_path": code }))
}
