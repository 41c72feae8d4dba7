//! Gateway error types and their HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ng_membership::RegistrationError;
use tracing::warn;

use super::config::ConfigError;
use super::types::ErrorResponse;

/// Error returned by a handler, rendered as `{"error": message}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status
    pub status: StatusCode,
    /// Client-facing message
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 - body is not the expected JSON
    pub fn invalid_json(details: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            format!("invalid JSON: {}", details.into()),
        )
    }

    /// 400 - name cannot be registered
    pub fn invalid_username(reason: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            format!("invalid username: {}", reason),
        )
    }

    /// 409 - name is (or may be) registered
    pub fn already_taken() -> Self {
        Self::new(StatusCode::CONFLICT, "username already taken")
    }

    /// 500 - durable append failed
    pub fn storage_failure() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to save username")
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::AlreadyTaken(_) => Self::already_taken(),
            RegistrationError::InvalidName { reason, .. } => Self::invalid_username(reason),
            RegistrationError::StorageUnavailable(_) => Self::storage_failure(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected request body");
        Self::invalid_json(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Gateway-level errors
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server socket bind error
    #[error("server bind error on {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(std::io::Error),
}
