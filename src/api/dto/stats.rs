//! DTOs for per-link and site-wide statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::{OverallStats, UrlStats};
use crate::domain::entities::Click;
use crate::domain::repositories::CountEntry;

/// A single recorded click as exposed over the API.
#[derive(Debug, Serialize)]
pub struct ClickItem {
    pub id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub browser: String,
    pub platform: String,
    pub device: String,
    pub referer: Option<String>,
    pub clicked_at: DateTime<Utc>,
}

impl From<Click> for ClickItem {
    fn from(click: Click) -> Self {
        Self {
            id: click.id,
            ip_address: click.ip_address,
            user_agent: click.user_agent,
            browser: click.browser,
            platform: click.platform,
            device: click.device,
            referer: click.referer,
            clicked_at: click.clicked_at,
        }
    }
}

/// Response for `GET /api/urls/{id}/stats`.
///
/// Breakdowns are sorted by count descending, ties by name.
#[derive(Debug, Serialize)]
pub struct UrlStatsResponse {
    pub url_id: i64,
    pub total_clicks: i64,
    pub browsers: Vec<CountEntry>,
    pub platforms: Vec<CountEntry>,
    pub devices: Vec<CountEntry>,
    pub recent_clicks: Vec<ClickItem>,
}

impl UrlStatsResponse {
    pub fn new(url_id: i64, stats: UrlStats) -> Self {
        Self {
            url_id,
            total_clicks: stats.total_clicks,
            browsers: stats.browsers,
            platforms: stats.platforms,
            devices: stats.devices,
            recent_clicks: stats.recent_clicks.into_iter().map(ClickItem::from).collect(),
        }
    }
}

/// Response for `GET /api/stats`.
#[derive(Debug, Serialize)]
pub struct OverallStatsResponse {
    pub total_urls: i64,
    pub total_clicks: i64,
    pub clicks_today: i64,
}

impl From<OverallStats> for OverallStatsResponse {
    fn from(stats: OverallStats) -> Self {
        Self {
            total_urls: stats.total_urls,
            total_clicks: stats.total_clicks,
            clicks_today: stats.clicks_today,
        }
    }
}
