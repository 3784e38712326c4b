//! HTTP-facing error type and JSON error envelope.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::repositories::RepositoryError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description used in JSON responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Outcomes returned to HTTP clients.
///
/// `NotFound` is an expected outcome (no basket stored under the id), while
/// `ServiceUnavailable` signals a technical failure the client may retry.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    ServiceUnavailable { message: String, details: Value },
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
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
            details,
        }
    }

    /// Returns true if the client may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::ServiceUnavailable { .. })
    }

    fn parts(&self) -> (StatusCode, &'static str, &str, &Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message.as_str(),
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message.as_str(), details)
            }
            AppError::ServiceUnavailable { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                message.as_str(),
                details,
            ),
        }
    }

    /// Converts the error into its JSON description without building a response.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message: message.to_string(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, ..) = self.parts();
        let retryable = self.is_retryable();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        if retryable {
            (status, [(header::RETRY_AFTER, "1")], Json(body)).into_response()
        } else {
            (status, Json(body)).into_response()
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Invalid basket", details)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::InvalidBasket(reason) => {
                AppError::bad_request("Invalid basket", json!({ "reason": reason }))
            }
            RepositoryError::CorruptPayload { key, .. } => AppError::unavailable(
                "Stored basket could not be read",
                json!({ "id": key, "retryable": true }),
            ),
            RepositoryError::StoreUnavailable(_) => AppError::unavailable(
                "Basket store is temporarily unavailable",
                json!({ "retryable": true }),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_basket_maps_to_validation() {
        let err: AppError =
            RepositoryError::InvalidBasket("basket id must not be empty".into()).into();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_store_failures_map_to_retryable_unavailable() {
        let corrupt: AppError = RepositoryError::CorruptPayload {
            key: "cart-2".into(),
            reason: "EOF while parsing".into(),
        }
        .into();
        let down: AppError = RepositoryError::StoreUnavailable("timeout".into()).into();

        assert!(corrupt.is_retryable());
        assert!(down.is_retryable());
        assert_eq!(corrupt.to_error_info().details["id"], "cart-2");
    }

    #[test]
    fn test_store_details_are_not_leaked() {
        let err: AppError =
            RepositoryError::StoreUnavailable("redis://:secret@10.0.0.5 refused".into()).into();
        let info = err.to_error_info();
        assert!(!info.details.to_string().contains("secret"));
        assert!(!info.message.contains("secret"));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::bad_request("x", json!({})), StatusCode::BAD_REQUEST),
            (AppError::not_found("x", json!({})), StatusCode::NOT_FOUND),
            (
                AppError::unavailable("x", json!({})),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_unavailable_sets_retry_after() {
        let response = AppError::unavailable("x", json!({})).into_response();
        assert_eq!(response.headers()[header::RETRY_AFTER], "1");
    }
}
