//! Error types for Wikiscout
//!
//! All errors implement `IntoResponse` for Axum handlers, producing the
//! `{error, message}` envelope the frontend expects.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Fixed user-facing string included in every error envelope.
///
/// Collaborator details go into the `error` field; this one never varies.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong while processing your request.";

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration in {path}: {reason}")]
    ConfigValidationFailed { path: String, reason: String },

    #[error("Lookup via {tool} failed: {reason}")]
    Lookup { tool: String, reason: String },

    #[error("Failed to query model at {endpoint}: {reason}")]
    ModelQuery { endpoint: String, reason: String },

    #[error("Request to {endpoint} timed out after {timeout_seconds} seconds")]
    RequestTimeout {
        endpoint: String,
        timeout_seconds: u64,
    },

    #[error("Failed to append to {path}: {source}")]
    SaveFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Config(_)
            | Self::ConfigFileRead { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigValidationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Lookup { .. } => StatusCode::BAD_GATEWAY,
            Self::ModelQuery { .. } => StatusCode::BAD_GATEWAY,
            Self::RequestTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::SaveFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "message": GENERIC_ERROR_MESSAGE,
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
