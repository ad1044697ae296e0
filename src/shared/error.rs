//! Application Error Types
//!
//! Centralized error handling with Axum integration.
//!
//! Error bodies follow the API contract: `{"error": <name or true>, "message": <text>}`.
//! Client errors carry the status name; internal failures carry `error: true` and a
//! generic message so no internal details leak to callers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::infrastructure::store::StoreError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: Value,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, Value::from("Not Found"), msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Value::from("Bad Request"), msg),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, Value::from("Unauthorized"), msg)
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, Value::from("Forbidden"), msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Value::from(true),
                    "Internal server error".into(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Value::from(true),
                    "Internal server error".into(),
                )
            }
        };

        let body = ErrorResponse { error, message };

        (status, Json(body)).into_response()
    }
}
