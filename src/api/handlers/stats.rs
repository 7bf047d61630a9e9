//! Handlers for click statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::{OverallStatsResponse, UrlStatsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Click breakdown for one link.
///
/// # Endpoint
///
/// `GET /api/urls/{id}/stats`
///
/// Deleted links keep their history, so their stats stay readable. An id
/// without clicks yields zero totals and empty breakdowns.
///
/// # Response
///
/// ```json
/// {
///   "url_id": 1,
///   "total_clicks": 3,
///   "browsers": [{ "name": "Chrome", "count": 2 }, { "name": "Firefox", "count": 1 }],
///   "platforms": [{ "name": "Windows", "count": 3 }],
///   "devices": [{ "name": "Desktop", "count": 3 }],
///   "recent_clicks": [...]
/// }
/// ```
pub async fn url_stats_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<UrlStatsResponse>, AppError> {
    let stats = state.analytics_service.url_stats(id).await?;

    Ok(Json(UrlStatsResponse::new(id, stats)))
}

/// Site-wide counters.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// `clicks_today` counts clicks since 00:00 UTC.
pub async fn overall_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<OverallStatsResponse>, AppError> {
    let stats = state.analytics_service.overall_stats().await?;

    Ok(Json(stats.into()))
}
