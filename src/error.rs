//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote service rejected the current token
    #[error("Not authorized: the session token was rejected")]
    Unauthorized,

    /// Remote service refused to delete the record
    #[error("Delete rejected for employee {id}")]
    DeleteRejected { id: i64 },

    /// Remote service returned an unexpected status or shape
    #[error("Service error: {0}")]
    Service(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a service error with message
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }
}
