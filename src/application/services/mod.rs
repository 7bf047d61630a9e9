//! Business logic services for the application layer.

pub mod analytics_service;
pub mod click_tracker;
pub mod shortener_service;

pub use analytics_service::{AnalyticsService, OverallStats, UrlStats};
pub use click_tracker::ClickTracker;
pub use shortener_service::ShortenerService;
