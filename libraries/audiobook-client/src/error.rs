//! Error types for the audiobook client.

use audiobook_core::ValidationError;
use thiserror::Error;

/// Errors that can occur when talking to the backend or the AI service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Login rejected
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Operation requires a logged-in user
    #[error("Not logged in")]
    NotLoggedIn,

    /// Invalid base URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Input rejected before any request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Entity could not be located after a write (id recovery by re-listing)
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// File not found for upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error while reading an upload
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ClientError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
