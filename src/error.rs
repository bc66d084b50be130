//! Error types for the EduSync client.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors that can occur when talking to the EduSync backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// The bearer token is missing, invalid or expired
    #[error("Authentication failed")]
    Unauthorized,

    /// The signed-in user's role may not perform this action
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response parsed but did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Input rejected before any request was sent
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// Whether this error means the session is no longer valid.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// HTTP status associated with the error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::NotFound(_) => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
