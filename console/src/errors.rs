//! Error types for the Lang console

use thiserror::Error;

/// Main error type for the Lang console
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-2xx response or `success: false` envelope
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Response did not have the shape the endpoint promises
    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not signed in: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A followed deployment settled as FAILED
    #[error("Deployment failed: {0}")]
    DeploymentFailed(String),

    #[error("Shutdown error: {0}")]
    ShutdownError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConsoleError {
    /// Build an application error from an HTTP status and optional server text
    pub fn from_status(status: reqwest::StatusCode, message: Option<&str>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        match status.as_u16() {
            401 => ConsoleError::Unauthorized(message),
            403 => ConsoleError::Forbidden(message),
            404 => ConsoleError::NotFound(message),
            code => ConsoleError::ApiError {
                status: code,
                message,
            },
        }
    }

    /// Short text suitable for an inline notice
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::ApiError { message, .. } => message.clone(),
            ConsoleError::NotFound(m)
            | ConsoleError::Unauthorized(m)
            | ConsoleError::Forbidden(m)
            | ConsoleError::ValidationError(m) => m.clone(),
            other => other.to_string(),
        }
    }

    /// Process exit code used by the binary
    pub fn exit_code(&self) -> i32 {
        match self {
            ConsoleError::ValidationError(_) => 2,
            ConsoleError::Unauthorized(_) | ConsoleError::Forbidden(_) => 3,
            ConsoleError::NotFound(_) => 4,
            ConsoleError::DeploymentFailed(_) => 5,
            _ => 1,
        }
    }
}

impl From<anyhow::Error> for ConsoleError {
    fn from(err: anyhow::Error) -> Self {
        ConsoleError::Internal(err.to_string())
    }
}
