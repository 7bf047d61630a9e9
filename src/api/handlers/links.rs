//! Handlers for link listing and deletion.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::api::dto::links::{DeleteResponse, LinkItem, LinkListResponse, ListQuery};
use crate::application::services::shortener_service::MAX_LIST_LIMIT;
use crate::error::AppError;
use crate::state::AppState;

/// Lists active links with their click counts.
///
/// # Endpoint
///
/// `GET /api/urls?limit=100`
///
/// `limit` defaults to and is capped at 100. Links are returned newest
/// first; deleted links never appear.
///
/// # Errors
///
/// Returns 400 Bad Request if `limit` is outside `1..=100`.
pub async fn link_list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<LinkListResponse>, AppError> {
    query.validate()?;

    let links = state
        .shortener_service
        .list_all(query.limit.unwrap_or(MAX_LIST_LIMIT))
        .await?;

    Ok(Json(LinkListResponse {
        urls: links.into_iter().map(LinkItem::from).collect(),
    }))
}

/// Soft-deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/urls/{id}`
///
/// # Behavior
///
/// - The row is kept with `is_active = false` so its clicks stay reportable
/// - The code stops resolving immediately
/// - Deleting an already-deleted link succeeds again
///
/// # Errors
///
/// Returns 404 Not Found if no link with this id was ever created.
pub async fn delete_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.shortener_service.delete(id).await?;

    if !deleted {
        return Err(AppError::not_found("Link not found", json!({ "id": id })));
    }

    info!(id, "Link deleted");

    Ok(Json(DeleteResponse { success: true }))
}
