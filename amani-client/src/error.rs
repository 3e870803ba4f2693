//! Error types for the portal client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the portal client
///
/// Non-2xx responses and unparsable bodies are not errors here; the smoke
/// flows inspect those as data. Only transport failures and violated
/// polling invariants surface as `ClientError`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Polling was requested without a registration identifier
    #[error("registration id must not be empty")]
    MissingRegistrationId,

    /// Poller was configured with a zero interval
    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,

    /// Poller was configured with a budget that allows no attempts
    #[error("poll budget must allow at least one attempt")]
    EmptyPollBudget,
}

impl ClientError {
    /// Check if this error is a transport-level failure
    ///
    /// Transport failures during polling are transient misses; everything
    /// else indicates a caller bug.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::RequestFailed(_))
    }
}
