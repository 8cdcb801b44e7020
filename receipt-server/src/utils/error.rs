//! Unified error handling
//!
//! Provides the application-level error type and response envelope:
//! - [`AppError`] - application error enum, implements `IntoResponse`
//! - [`AppResponse`] - API response envelope
//!
//! # Usage
//!
//! ```ignore
//! // Return an error
//! Err(AppError::NotFound("Task t1 not found".into()))
//!
//! // Return a success response
//! Ok(ok_with_message(data, "Tasks have been retrieved"))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// API response envelope
///
/// ```json
/// {
///   "message": "Tasks have been retrieved",
///   "data": [ ... ]
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Human-readable outcome message
    pub message: String,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
///
/// | Variant | Status | Meaning |
/// |---------|--------|---------|
/// | NotFound | 404 | unknown task id |
/// | Validation | 400 | bad client input |
/// | Printer | 500 | device unreachable or write failed |
/// | Storage | 500 | counter persistence failure |
/// | Upstream | 502 | workspace database unreachable or rejected the call |
/// | Internal | 500 | anything else |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Printer error: {0}")]
    Printer(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Printer(msg) => {
                error!(target: "printer", error = %msg, "Printer error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Storage(msg) => {
                error!(target: "storage", error = %msg, "Storage error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }
            AppError::Upstream(msg) => {
                error!(target: "taskstore", error = %msg, "Upstream error occurred");
                (StatusCode::BAD_GATEWAY, "Task store error".to_string())
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

/// Result type for HTTP handlers
pub type AppResult<T> = Result<T, AppError>;

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        message: "Success".to_string(),
        data: Some(data),
    })
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<AppResponse<T>> {
    Json(AppResponse {
        message: message.into(),
        data: Some(data),
    })
}
