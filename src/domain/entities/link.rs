//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A short code bound to an original URL.
///
/// Links are never hard-deleted. Deleting a link flips `is_active` to
/// `false` so that its clicks stay reportable; inactive links cannot be
/// resolved and cannot be reactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        short_code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            short_code,
            original_url,
            created_at,
            is_active,
        }
    }

    /// Returns true if the link has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        !self.is_active
    }
}

/// A link together with the number of clicks recorded against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkWithClicks {
    pub link: Link,
    pub click_count: i64,
}
