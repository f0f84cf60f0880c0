//! HTTP-facing error handling
//!
//! [`AppError`] wraps the order core's taxonomy for the axum boundary.
//! Every response body uses the `{status, message}` envelope; structured
//! detail (field name, conflicting table status, from/to statuses) is
//! carried in the message so the caller can show a precise reason.
//!
//! # Status mapping
//!
//! | Error | HTTP |
//! |-------|------|
//! | Validation | 400 |
//! | NotFound | 404 |
//! | Conflict (table occupied, invalid transition) | 409 |
//! | BusinessRule (unknown menu item) | 422 |
//! | Database / Internal | 500 |

use crate::orders::OrderError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::response::ApiResponse;
use tracing::error;

/// Application error for HTTP handlers
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::BusinessRule(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(message));
        (status, body).into_response()
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match &err {
            OrderError::Validation { .. } => AppError::Validation(err.to_string()),
            OrderError::TableConflict { .. } | OrderError::InvalidTransition { .. } => {
                AppError::Conflict(err.to_string())
            }
            OrderError::UnknownMenuItem(_) => AppError::BusinessRule(err.to_string()),
            OrderError::NotFound(_) => AppError::NotFound(err.to_string()),
            OrderError::Storage(e) => AppError::Database(e.to_string()),
        }
    }
}
