//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

use super::client_info::ClientInfo;

/// A click recorded when a short link is resolved.
///
/// `browser`, `platform` and `device` hold the classifier labels as stored;
/// the raw user agent is kept alongside for later re-classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub id: i64,
    pub url_id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub browser: String,
    pub platform: String,
    pub device: String,
    pub referer: Option<String>,
    pub clicked_at: DateTime<Utc>,
}

/// Raw request metadata captured at redirect time.
///
/// All fields are optional: proxies strip headers and clients omit them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickMeta {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

/// Input data for recording a new click event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub url_id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub client: ClientInfo,
    pub clicked_at: DateTime<Utc>,
}
