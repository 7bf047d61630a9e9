//! Best-effort click recording.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::domain::classifier::classify;
use crate::domain::entities::{ClickMeta, NewClick};
use crate::domain::repositories::ClickRepository;

/// Classifies and persists click events.
///
/// Tracking must never get in the way of a redirect, so [`ClickTracker::track`]
/// reports failure as `false` instead of returning an error.
pub struct ClickTracker<C: ClickRepository + ?Sized> {
    click_repository: Arc<C>,
}

impl<C: ClickRepository + ?Sized> ClickTracker<C> {
    /// Creates a new click tracker.
    pub fn new(click_repository: Arc<C>) -> Self {
        Self { click_repository }
    }

    /// Records one click for `url_id`, stamped with the current time.
    ///
    /// Returns `true` once the click is stored. Storage errors are logged
    /// at `warn` and reported as `false`.
    pub async fn track(&self, url_id: i64, meta: ClickMeta) -> bool {
        let client = classify(meta.user_agent.as_deref().unwrap_or_default());

        let new_click = NewClick {
            url_id,
            ip_address: meta.ip,
            user_agent: meta.user_agent,
            referer: meta.referer,
            client,
            clicked_at: Utc::now(),
        };

        match self.click_repository.record_click(new_click).await {
            Ok(_) => true,
            Err(e) => {
                warn!(url_id, "Click tracking failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Browser, Click, Device, Platform};
    use crate::domain::repositories::MockClickRepository;
    use crate::error::AppError;
    use serde_json::json;

    fn stored(new_click: &NewClick) -> Click {
        Click {
            id: 1,
            url_id: new_click.url_id,
            ip_address: new_click.ip_address.clone(),
            user_agent: new_click.user_agent.clone(),
            browser: new_click.client.browser.to_string(),
            platform: new_click.client.platform.to_string(),
            device: new_click.client.device.to_string(),
            referer: new_click.referer.clone(),
            clicked_at: new_click.clicked_at,
        }
    }

    #[tokio::test]
    async fn test_track_classifies_and_records() {
        let mut mock_repo = MockClickRepository::new();

        mock_repo
            .expect_record_click()
            .withf(|c| {
                c.url_id == 10
                    && c.client.browser == Browser::Firefox
                    && c.client.platform == Platform::Windows
                    && c.client.device == Device::Desktop
                    && c.ip_address.as_deref() == Some("192.168.1.1")
                    && c.referer.as_deref() == Some("https://google.com")
            })
            .times(1)
            .returning(|c| Ok(stored(&c)));

        let tracker = ClickTracker::new(Arc::new(mock_repo));

        let tracked = tracker
            .track(
                10,
                ClickMeta {
                    ip: Some("192.168.1.1".to_string()),
                    user_agent: Some(
                        "Mozilla/5.0 (Windows NT 10.0; rv:121.0) Gecko/20100101 Firefox/121.0"
                            .to_string(),
                    ),
                    referer: Some("https://google.com".to_string()),
                },
            )
            .await;

        assert!(tracked);
    }

    #[tokio::test]
    async fn test_track_without_user_agent() {
        let mut mock_repo = MockClickRepository::new();

        mock_repo
            .expect_record_click()
            .withf(|c| c.user_agent.is_none() && c.client.browser == Browser::Unknown)
            .times(1)
            .returning(|c| Ok(stored(&c)));

        let tracker = ClickTracker::new(Arc::new(mock_repo));

        assert!(tracker.track(3, ClickMeta::default()).await);
    }

    #[tokio::test]
    async fn test_track_swallows_storage_errors() {
        let mut mock_repo = MockClickRepository::new();

        mock_repo
            .expect_record_click()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let tracker = ClickTracker::new(Arc::new(mock_repo));

        assert!(!tracker.track(3, ClickMeta::default()).await);
    }
}
