//! Error types and handling for the chat shim.
//!
//! This module provides a unified error type [`AppError`] that wraps various error sources
//! and implements proper HTTP response conversion.

use crate::api::validate::SchemaError;
use crate::backend::BackendError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error type string for client-side validation failures (OpenAI-compatible).
pub const ERROR_TYPE_INVALID_REQUEST: &str = "invalid_request_error";

/// Error type string for server/backend-side failures.
pub const ERROR_TYPE_API: &str = "api_error";

/// Main error type for the application.
///
/// All errors in the application should be converted to this type for consistent handling.
#[derive(Error, Debug)]
pub enum AppError {
    /// Inbound payload does not match the chat-completion contract
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The external backend failed (unreachable, timeout, or unparseable reply)
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal server errors with custom message
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable error category reported to clients.
    ///
    /// Backend failures are reduced to a category so no upstream internals leak
    /// into the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Schema(_) => "invalid_request",
            AppError::Backend(BackendError::Unreachable(_)) => "backend_unreachable",
            AppError::Backend(BackendError::MalformedReply(_)) => "backend_malformed_reply",
            AppError::Serialization(_) | AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::Schema(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ERROR_TYPE_INVALID_REQUEST,
                self.to_string(),
            ),
            AppError::Backend(e) => {
                tracing::error!(error = %e, "Backend call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ERROR_TYPE_API,
                    "The upstream backend failed to produce a reply".to_string(),
                )
            }
            AppError::Serialization(e) => {
                tracing::error!(error = %e, "Serialization failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ERROR_TYPE_API,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ERROR_TYPE_API,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "type": error_type,
                "code": self.code(),
            }
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
