//! Per-link and site-wide click statistics.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::domain::entities::Click;
use crate::domain::repositories::{ClickDimension, ClickRepository, CountEntry, LinkRepository};
use crate::error::AppError;

/// Number of clicks listed in [`UrlStats::recent_clicks`].
pub const RECENT_CLICKS_LIMIT: i64 = 10;

/// Click breakdown for a single link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlStats {
    pub total_clicks: i64,
    pub browsers: Vec<CountEntry>,
    pub platforms: Vec<CountEntry>,
    pub devices: Vec<CountEntry>,
    pub recent_clicks: Vec<Click>,
}

/// Site-wide counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverallStats {
    pub total_urls: i64,
    pub total_clicks: i64,
    pub clicks_today: i64,
}

/// Service computing statistics from stored clicks.
///
/// Every call queries the store afresh; nothing is cached. An empty store
/// yields zero-valued results, never an error.
pub struct AnalyticsService<C: ClickRepository + ?Sized, L: LinkRepository + ?Sized> {
    click_repository: Arc<C>,
    link_repository: Arc<L>,
}

impl<C: ClickRepository + ?Sized, L: LinkRepository + ?Sized> AnalyticsService<C, L> {
    /// Creates a new analytics service.
    pub fn new(click_repository: Arc<C>, link_repository: Arc<L>) -> Self {
        Self {
            click_repository,
            link_repository,
        }
    }

    /// Statistics for one link, including soft-deleted ones.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn url_stats(&self, url_id: i64) -> Result<UrlStats, AppError> {
        let clicks = self.click_repository.as_ref();

        let (total_clicks, browsers, platforms, devices, recent_clicks) = tokio::try_join!(
            clicks.count_for_url(url_id),
            clicks.breakdown(url_id, ClickDimension::Browser),
            clicks.breakdown(url_id, ClickDimension::Platform),
            clicks.breakdown(url_id, ClickDimension::Device),
            clicks.recent_for_url(url_id, RECENT_CLICKS_LIMIT),
        )?;

        Ok(UrlStats {
            total_clicks,
            browsers,
            platforms,
            devices,
            recent_clicks,
        })
    }

    /// Site-wide counters, with "today" meaning the current UTC date.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn overall_stats(&self) -> Result<OverallStats, AppError> {
        self.overall_stats_on(Utc::now().date_naive()).await
    }

    /// Site-wide counters with `clicks_today` counted for `day` (UTC).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn overall_stats_on(&self, day: NaiveDate) -> Result<OverallStats, AppError> {
        let (from, to) = day_bounds(day);

        let (total_urls, total_clicks, clicks_today) = tokio::try_join!(
            self.link_repository.count_active(),
            self.click_repository.count_all(),
            self.click_repository.count_between(from, to),
        )?;

        Ok(OverallStats {
            total_urls,
            total_clicks,
            clicks_today,
        })
    }
}

/// Half-open UTC interval `[00:00, next 00:00)` covering `day`.
fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let from = day.and_time(NaiveTime::MIN).and_utc();
    (from, from + Duration::days(1))
}
