//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::debug;
use validator::Validate;

use crate::api::dto::shorten::{ShortenFailure, ShortenRequest, ShortenResponse};
use crate::state::AppState;

/// Creates (or reuses) the short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "short_code": "aZ3kP9q",
///   "short_url": "http://localhost:3000/aZ3kP9q",
///   "original_url": "https://example.com/some/long/path"
/// }
/// ```
///
/// Shortening an already-shortened URL returns the existing code.
///
/// # Errors
///
/// Every failure uses the `{"success": false, "error": "..."}` envelope:
/// 400 for a missing, malformed or non-absolute URL and 500 when the link
/// could not be stored.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, (StatusCode, Json<ShortenFailure>)> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!("Rejected shorten body: {}", rejection);
        (
            StatusCode::BAD_REQUEST,
            Json(ShortenFailure::new("URL is required")),
        )
    })?;

    if payload.validate().is_err() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ShortenFailure::new("URL is required")),
        ));
    }

    let link = state
        .shortener_service
        .shorten(&payload.url)
        .await
        .map_err(|err| (err.status(), Json(ShortenFailure::from(&err))))?;

    let short_url = state.short_url(&link.short_code);

    Ok(Json(ShortenResponse::new(link, short_url)))
}
