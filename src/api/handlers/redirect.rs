//! Handler for short URL redirect.

use std::net::SocketAddr;
use std::sync::LazyLock;

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use regex::Regex;
use serde_json::json;
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Shape a path segment must have to be treated as a short code.
static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,10}$").unwrap());

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject anything that is not 6 to 10 alphanumerics
/// 2. Resolve the code against active links
/// 3. Queue a click event for the background worker
/// 4. Return 301 Moved Permanently
///
/// # Click Tracking
///
/// Click events go onto a bounded channel. If the queue is full or closed
/// the click is dropped with a warning; the redirect is never held up.
///
/// # Errors
///
/// Returns 404 Not Found if the code is malformed, unknown or deleted.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    if !CODE_PATTERN.is_match(&code) {
        return Err(not_found(&code));
    }

    let link = state
        .shortener_service
        .resolve(&code)
        .await?
        .ok_or_else(|| not_found(&code))?;

    let click_event = ClickEvent::new(
        link.id,
        link.short_code,
        Some(addr.ip().to_string()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    if let Err(e) = state.click_sender.try_send(click_event) {
        warn!(code = %code, "Click event dropped: {}", e);
    }

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, link.original_url)],
    ))
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
