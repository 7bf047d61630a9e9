//! Background worker draining the click queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::application::services::ClickTracker;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::ClickRepository;

/// Persists queued click events until every sender is dropped.
///
/// Tracking is best-effort: a failed write is logged by the tracker and the
/// worker moves on to the next event.
pub async fn run_click_worker<C: ClickRepository + ?Sized + 'static>(
    mut rx: mpsc::Receiver<ClickEvent>,
    tracker: Arc<ClickTracker<C>>,
) {
    while let Some(event) = rx.recv().await {
        let tracked = tracker.track(event.url_id, event.meta).await;
        debug!(code = %event.code, url_id = event.url_id, tracked, "Click processed");
    }

    info!("Click queue closed, worker stopping");
}
