//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::NaiveDate;
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("Requested dates overlap an existing reservation")]
    Conflict {
        existing_start: NaiveDate,
        existing_end: NaiveDate,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned to API clients
#[derive(Debug, Serialize)]
struct ErrorBody {
    error_type: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, details) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", None),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::Validation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", None)
            }
            AppError::Conflict {
                existing_start,
                existing_end,
            } => (
                StatusCode::CONFLICT,
                "reservation_conflict",
                Some(serde_json::json!({
                    "existing_start": existing_start,
                    "existing_end": existing_end,
                })),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        // 5xx responses carry a generic message only
        let message = if status.is_server_error() {
            "Something went wrong".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            error_type,
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
