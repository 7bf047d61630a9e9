//! Application error type shared by every layer.
//!
//! | Variant      | Status | `error.code`        |
//! |--------------|--------|---------------------|
//! | `Validation` | 400    | `validation_error`  |
//! | `NotFound`   | 404    | `not_found`         |
//! | `Conflict`   | 409    | `conflict`          |
//! | `Internal`   | 500    | `internal_error`    |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Unique index guarding active short codes.
pub const SHORT_CODE_CONSTRAINT: &str = "urls_active_short_code_key";

/// Unique index guarding active original URLs.
pub const ORIGINAL_URL_CONSTRAINT: &str = "urls_active_original_url_key";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload embedded in JSON responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Conflict on an already-bound active short code.
    pub fn code_taken(code: &str) -> Self {
        Self::conflict(
            "Short code already in use",
            json!({ "field": "short_code", "code": code }),
        )
    }

    /// Conflict on an original URL that already has an active link.
    pub fn url_taken(url: &str) -> Self {
        Self::conflict(
            "URL already shortened",
            json!({ "field": "original_url", "url": url }),
        )
    }

    /// Returns true for a [`AppError::Conflict`] raised on `field`.
    pub fn is_conflict_on(&self, field: &str) -> bool {
        match self {
            AppError::Conflict { details, .. } => details["field"] == field,
            _ => false,
        }
    }

    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.parts().1,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return match db.constraint() {
                Some(SHORT_CODE_CONSTRAINT) => AppError::conflict(
                    "Unique constraint violation",
                    json!({ "field": "short_code", "constraint": SHORT_CODE_CONSTRAINT }),
                ),
                Some(ORIGINAL_URL_CONSTRAINT) => AppError::conflict(
                    "Unique constraint violation",
                    json!({ "field": "original_url", "constraint": ORIGINAL_URL_CONSTRAINT }),
                ),
                other => AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": other }),
                ),
            };
        }

        tracing::error!("Database error: {}", e);
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
        AppError::bad_request("Validation failed", json!({ "fields": fields }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("x", json!({})).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::internal("x", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflict_field_detection() {
        let err = AppError::code_taken("abcDEF1");
        assert!(err.is_conflict_on("short_code"));
        assert!(!err.is_conflict_on("original_url"));

        let err = AppError::url_taken("https://example.com");
        assert!(err.is_conflict_on("original_url"));

        assert!(!AppError::internal("boom", json!({})).is_conflict_on("short_code"));
    }

    #[test]
    fn test_error_info_and_display() {
        let err = AppError::bad_request("Invalid URL", json!({ "reason": "missing host" }));
        assert_eq!(err.to_string(), "Invalid URL");

        let info = err.to_error_info();
        assert_eq!(info.code, "validation_error");
        assert_eq!(info.details["reason"], "missing host");
    }
}
