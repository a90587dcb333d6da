//! HTTP error handling and response conversion.
//!
//! Failures from the comment backend are mapped to HTTP status codes and a
//! JSON body of the form `{"error": "..."}`. The full error is logged; the
//! body only carries a user-safe message.

use crate::domain::comment::errors::RemoteError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found (404).
    NotFound(String),

    /// Malformed request (400).
    BadRequest(String),

    /// Request data failed validation (400).
    ValidationError(String),

    /// The backend refused our credentials (401).
    Unauthorized(String),

    /// The backend answered with an error or an unreadable body (502).
    Upstream(String),

    /// The backend could not be reached (503).
    ExternalService(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::Upstream(msg) => write!(f, "Upstream error: {}", msg),
            Self::ExternalService(msg) => write!(f, "External service error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::ExternalService(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get a user-safe error message (without implementation details).
    fn user_message(&self) -> String {
        match self {
            Self::NotFound(_) => "Resource not found".into(),
            Self::BadRequest(msg) => msg.clone(),
            Self::ValidationError(msg) => msg.clone(),
            Self::Unauthorized(_) => "Comment backend rejected the credentials".into(),
            Self::Upstream(_) => "Comment backend returned an error".into(),
            Self::ExternalService(_) => "Comment backend unavailable".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        match status {
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE => {
                tracing::error!("error={}", self);
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
                tracing::warn!("error={}", self);
            }
            _ => {
                tracing::info!("error={}", self);
            }
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// === Remote Error Conversion ===

impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::NotFound(msg) => AppError::NotFound(msg),
            RemoteError::Validation(msg) => AppError::ValidationError(msg),
            RemoteError::Unauthorized(msg) => AppError::Unauthorized(msg),
            RemoteError::Api {
                status,
                code,
                message,
            } => AppError::Upstream(format!("{} {}: {}", status, code, message)),
            RemoteError::Transport(msg) => AppError::ExternalService(msg),
            RemoteError::Decode(msg) => AppError::Upstream(msg),
        }
    }
}
