//! Click event model for asynchronous click tracking.

use super::entities::ClickMeta;

/// An in-memory click event handed from the redirect handler to the worker.
///
/// The handler pushes it onto a bounded channel and answers the redirect
/// right away; [`crate::domain::click_worker::run_click_worker`] persists it
/// later through the click tracker.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub url_id: i64,
    /// Short code as requested; carried for log correlation only.
    pub code: String,
    pub meta: ClickMeta,
}

impl ClickEvent {
    /// Creates a new click event from request metadata.
    pub fn new(
        url_id: i64,
        code: String,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            url_id,
            code,
            meta: ClickMeta {
                ip,
                user_agent: user_agent.map(|s| s.to_string()),
                referer: referer.map(|s| s.to_string()),
            },
        }
    }
}
