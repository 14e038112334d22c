//! Domain errors for the issue notifier.

use thiserror::Error;

/// Errors raised while resolving an event or talking to the issue tracker.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The API answered with a non-success status
    #[error("GitHub {operation} returned {status}: {body}")]
    GitHubApi {
        /// Client operation, e.g. `get_issue`
        operation: String,
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Response body did not decode
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Event payload lacks what its handler needs
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        DomainError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

/// Errors that can occur when delivering a message to a webhook endpoint.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Webhook returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Channel is not configured
    #[error("Channel not configured: {0}")]
    NotConfigured(String),
}
