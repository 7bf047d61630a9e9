//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;
use crate::error::AppError;

/// Request body for `POST /api/shorten`.
///
/// A missing `url` deserializes to an empty string so that it is reported
/// through the same envelope as an invalid one.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 2048, message = "URL is required"))]
    pub url: String,
}

/// Successful shorten result.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub success: bool,
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
}

impl ShortenResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            success: true,
            short_code: link.short_code,
            short_url,
            original_url: link.original_url,
        }
    }
}

/// Failure envelope: `{"success": false, "error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ShortenFailure {
    pub success: bool,
    pub error: String,
}

impl ShortenFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

impl From<&AppError> for ShortenFailure {
    fn from(err: &AppError) -> Self {
        Self::new(err.to_string())
    }
}
