//! Error types for remote calls and the discovery pipeline.

use thiserror::Error;

/// Errors raised while talking to the music service or running the pipeline.
///
/// An unauthorized response is usually *not* an error: remote calls report it
/// as `Ok(None)` and each stage decides whether that means "skip" or
/// [`DiscoveryError::CredentialExpired`].
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The credential was rejected where a result is mandatory
    /// (profile lookup, playlist creation, track writes).
    #[error("Credential expired or revoked")]
    CredentialExpired,

    /// HTTP transport failed.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status other than 401.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not the JSON we expected.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The lookback window cannot be placed on the calendar.
    #[error("Invalid lookback window of {0} days")]
    InvalidWindow(i64),

    /// Authorization code exchange or token refresh failed.
    #[error("Authorization error: {0}")]
    Auth(String),

    /// A fan-out task panicked or was cancelled.
    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type alias for remote and pipeline operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
