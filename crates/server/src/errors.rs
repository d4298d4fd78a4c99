use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use service::store::StoreError;
use thiserror::Error;
use tracing::error;

use crate::metrics;

/// Request-level failure, rendered as an HTTP response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown or malformed identifier. Rendered as a bare 404.
    #[error("not found")]
    NotFound,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        if e.is_not_found() {
            ApiError::NotFound
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Validation(detail) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "Validation Error", "detail": detail})),
            )
                .into_response(),
            ApiError::Internal(detail) => {
                // detail stays in the logs only
                error!(error = %detail, "request failed");
                metrics::STORE_ERRORS_TOTAL.inc();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Internal Server Error"})),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("document store unavailable: {0}")]
    Store(#[from] StoreError),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
