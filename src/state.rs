//! Shared application state injected into every handler.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::application::services::{AnalyticsService, ShortenerService};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{ClickRepository, LinkRepository};

/// Which backend the repositories run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Postgres,
    Memory,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Postgres => "postgres",
            StorageKind::Memory => "memory",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shortener service over whichever link store was configured.
pub type DynShortenerService = ShortenerService<dyn LinkRepository>;

/// Analytics service over whichever stores were configured.
pub type DynAnalyticsService = AnalyticsService<dyn ClickRepository, dyn LinkRepository>;

/// Application state shared across handlers.
///
/// Cloning is cheap: services sit behind `Arc` and the click sender is a
/// handle onto the worker's queue.
#[derive(Clone)]
pub struct AppState {
    pub shortener_service: Arc<DynShortenerService>,
    pub analytics_service: Arc<DynAnalyticsService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    pub base_url: String,
    pub storage: StorageKind,
}

impl AppState {
    /// Wires the services onto the given repositories.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        click_repository: Arc<dyn ClickRepository>,
        click_sender: mpsc::Sender<ClickEvent>,
        base_url: impl Into<String>,
        storage: StorageKind,
    ) -> Self {
        let shortener_service = Arc::new(ShortenerService::new(link_repository.clone()));
        let analytics_service = Arc::new(AnalyticsService::new(click_repository, link_repository));

        Self {
            shortener_service,
            analytics_service,
            click_sender,
            base_url: base_url.into(),
            storage,
        }
    }

    /// Public URL of a short code, e.g. `http://localhost:3000/abc1234`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
