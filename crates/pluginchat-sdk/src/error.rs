//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK.

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid configuration (e.g. an endpoint that is not an absolute URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// The service answered with a non-success HTTP status.
    #[error("backend rejected the request: {status} {status_text}")]
    Backend {
        /// Numeric HTTP status.
        status: u16,
        /// Reason phrase for the status (e.g. `Internal Server Error`).
        status_text: String,
    },

    /// Transport-level failure (connection refused, DNS, timeout, …).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SdkError {
    /// `true` when the service itself refused the request, as opposed to the
    /// call failing on the way there or back.
    pub fn is_backend_rejection(&self) -> bool {
        matches!(self, SdkError::Backend { .. })
    }

    /// Reason phrase of a backend rejection; `None` for every other error.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            SdkError::Backend { status_text, .. } => Some(status_text),
            _ => None,
        }
    }
}
