//! Error types for Footagedrop
//!
//! All errors in the application are converted to `AppError`,
//! which implements `IntoResponse` for proper HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Application-wide error type
///
/// Upstream provider failures carry the provider detail for logging
/// but the detail is never echoed back to the caller.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or incomplete request body (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unrecognized operation discriminator (400)
    #[error("Invalid action")]
    InvalidAction,

    /// Storage provider rejected the account credentials (502)
    #[error("Storage authorization failed: {0}")]
    UpstreamAuth(String),

    /// Storage provider upload-URL issuance failed (502)
    #[error("Storage provider error: {0}")]
    UpstreamStorage(String),

    /// Email provider rejected the send (502)
    #[error("Email provider error: {0}")]
    UpstreamEmail(String),

    /// Outbound HTTP transport error (502)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Configuration error (500)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl IntoResponse for AppError {
    /// Convert error to HTTP response
    ///
    /// Maps each error variant to an HTTP status code and a JSON error
    /// body. Validation messages are returned verbatim; provider and
    /// internal detail is logged and replaced with a category message.
    fn into_response(self) -> Response {
        use axum::Json;

        let (status, error_message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidAction => (StatusCode::BAD_REQUEST, "Invalid action".to_string()),
            AppError::UpstreamAuth(detail) => {
                tracing::error!(%detail, "Storage authorization failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Storage authorization failed".to_string(),
                )
            }
            AppError::UpstreamStorage(detail) => {
                tracing::error!(%detail, "Storage provider call failed");
                (StatusCode::BAD_GATEWAY, "Storage provider error".to_string())
            }
            AppError::UpstreamEmail(detail) => {
                tracing::error!(%detail, "Email provider call failed");
                (StatusCode::BAD_GATEWAY, "Email provider error".to_string())
            }
            AppError::HttpClient(error) => {
                tracing::error!(%error, "Outbound HTTP request failed");
                (StatusCode::BAD_GATEWAY, "Upstream request failed".to_string())
            }
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Internal(error) => {
                tracing::error!(%error, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
