//! API route configuration.

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::api::handlers::{
    delete_link_handler, link_list_handler, overall_stats_handler, shorten_handler,
    url_stats_handler,
};
use crate::state::AppState;

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /shorten`          - Shorten a URL (idempotent per URL)
/// - `GET    /urls`             - Active links with click counts
/// - `DELETE /urls/{id}`        - Soft-delete a link
/// - `GET    /urls/{id}/stats`  - Click breakdown for one link
/// - `GET    /stats`            - Site-wide counters
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(link_list_handler))
        .route("/urls/{id}", delete(delete_link_handler))
        .route("/urls/{id}/stats", get(url_stats_handler))
        .route("/stats", get(overall_stats_handler))
}
