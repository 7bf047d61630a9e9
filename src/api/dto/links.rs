//! DTOs for link listing and deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::LinkWithClicks;

/// Query parameters for `GET /api/urls`.
#[derive(Debug, Deserialize, Validate)]
pub struct ListQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

/// One row of the link list.
#[derive(Debug, Serialize)]
pub struct LinkItem {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<LinkWithClicks> for LinkItem {
    fn from(item: LinkWithClicks) -> Self {
        Self {
            id: item.link.id,
            short_code: item.link.short_code,
            original_url: item.link.original_url,
            click_count: item.click_count,
            created_at: item.link.created_at,
        }
    }
}

/// `{"urls": [...]}`, newest first.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub urls: Vec<LinkItem>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}
