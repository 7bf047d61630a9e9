//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkWithClicks};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Lookups only ever see active links. Uniqueness of active short codes and
/// of active original URLs is enforced by [`LinkRepository::insert`] itself,
/// atomically, so callers never have to check before writing.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds an active link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds the active link for an original URL, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_original_url(&self, url: &str) -> Result<Option<Link>, AppError>;

    /// Inserts a new active link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] tagged with field `short_code` if the
    /// code is bound to another active link, or with field `original_url` if
    /// the URL already has an active link.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, original_url: &str, code: &str) -> Result<Link, AppError>;

    /// Lists active links, newest first, each with its total click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_active(&self, limit: i64) -> Result<Vec<LinkWithClicks>, AppError>;

    /// Marks a link inactive.
    ///
    /// Returns `Ok(true)` if a link with this id exists (whether it was
    /// active or already inactive), `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts active links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_active(&self) -> Result<i64, AppError>;
}
