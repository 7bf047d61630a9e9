//! Repository trait for click events and analytics queries.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Click attribute a breakdown is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDimension {
    Browser,
    Platform,
    Device,
}

impl ClickDimension {
    /// Column holding this attribute in the `clicks` table.
    pub fn column(&self) -> &'static str {
        match self {
            ClickDimension::Browser => "browser",
            ClickDimension::Platform => "platform",
            ClickDimension::Device => "device",
        }
    }

    /// Reads this attribute from a stored click.
    pub fn value_of<'a>(&self, click: &'a Click) -> &'a str {
        match self {
            ClickDimension::Browser => &click.browser,
            ClickDimension::Platform => &click.platform,
            ClickDimension::Device => &click.device,
        }
    }
}

/// One row of a grouped count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub name: String,
    pub count: i64,
}

impl CountEntry {
    pub fn new(name: impl Into<String>, count: i64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Repository interface for click events.
///
/// Clicks are append-only: they are never updated or removed, and they
/// outlive the soft deletion of their link.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Records a new click event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors, including a
    /// reference to a link id that does not exist.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Counts clicks recorded for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_for_url(&self, url_id: i64) -> Result<i64, AppError>;

    /// Groups a link's clicks by `dimension`, ordered by count descending
    /// and then by name ascending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn breakdown(
        &self,
        url_id: i64,
        dimension: ClickDimension,
    ) -> Result<Vec<CountEntry>, AppError>;

    /// Returns up to `limit` of a link's clicks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn recent_for_url(&self, url_id: i64, limit: i64) -> Result<Vec<Click>, AppError>;

    /// Counts every click ever recorded.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_all(&self) -> Result<i64, AppError>;

    /// Counts clicks with `from <= clicked_at < to`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, AppError>;
}
