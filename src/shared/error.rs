//! Error handling module
//!
//! This module provides centralized error handling for the application.
//! Business failures of the mining protocol never surface as HTTP errors;
//! they travel inside a 200 response body. Only the dispatcher decides how
//! an `AppError` reaches the wire.

use thiserror::Error;

/// Reasons a nonce submission is refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Account ID not set")]
    AccountIdNotSet,

    #[error("Nonce not set or invalid")]
    NonceNotSet,

    /// Refusal reported by the scoring collaborator (stale round, duplicate, ...)
    #[error("{0}")]
    Rejected(String),
}

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON serialization error: {0}")]
    Json(String),

    #[error("Pool core error: {0}")]
    Upstream(String),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("Client disconnected: {0}")]
    Disconnected(String),

    #[error("Request too large: {size} bytes exceeds limit of {limit} bytes")]
    RequestTooLarge { size: u64, limit: u64 },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the error means the peer went away mid-request
    pub fn is_disconnect(&self) -> bool {
        matches!(self, AppError::Disconnected(_))
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

impl warp::reject::Reject for AppError {}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match err.kind() {
            ErrorKind::BrokenPipe | ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted => {
                AppError::Disconnected(err.to_string())
            }
            _ => AppError::Io(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}
