//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Nickname is empty or whitespace only
    #[error("Nickname must not be blank")]
    InvalidNickname,

    /// Server URL could not be parsed
    #[error("Invalid server URL '{0}': {1}")]
    InvalidUrl(String, String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl ClientError {
    /// Whether reconnecting could help
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::ConnectionError(_))
    }
}
