//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service, and its mapping
//! onto the HTTP status/body contract.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::error;

use crate::config::ConfigError;
use reminder_core::ports::PortError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// A malformed or out-of-bounds request body. Carries the user-facing
    /// message plus the specific validation failure.
    #[error("{message}: {error}")]
    Validation { message: String, error: String },

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    /// Shorthand for a 400 on the reminder-update path.
    pub fn bad_update(error: impl Into<String>) -> Self {
        Self::Validation {
            message: "Error updating reminder".to_string(),
            error: error.into(),
        }
    }

    /// Shorthand for a 400 on the reminder-create path.
    pub fn bad_create(error: impl Into<String>) -> Self {
        Self::Validation {
            message: "Invalid reminder".to_string(),
            error: error.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Port(PortError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Reminder not found" })),
            )
                .into_response(),
            ApiError::Validation { message, error } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": message, "error": error })),
            )
                .into_response(),
            other => {
                error!("Internal error while handling request: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "An unexpected internal error occurred" })),
                )
                    .into_response()
            }
        }
    }
}
