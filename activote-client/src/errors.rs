use activote_common::{ErrorBody, ValidationError};
use thiserror::Error;

/// Every failure a client operation can surface.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response (DNS, refused connection, TLS...).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx body could not be decoded into the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// No token or user id is available for an operation that requires one.
    #[error("No active session. Please log in again.")]
    MissingSession,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Message extracted from a non-2xx response body, if any.
    pub fn server_message(&self) -> Option<String> {
        match self {
            ClientError::Status { body, .. } => ErrorBody::parse(body).message(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
