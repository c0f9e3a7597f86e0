//! Error types for the submission client.

use thiserror::Error;

/// Errors that can occur while talking to the tracking service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// A membership roster could not be parsed.
    #[error("malformed membership response: {0}")]
    Membership(String),
}

impl SubmitError {
    /// HTTP status of a rejected request.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for submission operations.
pub type Result<T> = std::result::Result<T, SubmitError>;
