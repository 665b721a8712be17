//! Error types for stratus-feed.

/// Result type for stratus-feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

/// Errors that can occur while fetching or decoding the forecast feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("Feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Feed returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The endpoint answered with an empty body.
    #[error("Feed returned an empty body")]
    EmptyBody,

    /// The body was not the expected forecast document shape.
    #[error("Failed to decode feed: {0}")]
    Decode(String),
}

impl FeedError {
    /// Whether a later retry (by the external scheduler) could plausibly
    /// succeed without any change on our side.
    ///
    /// Transport failures, empty bodies, and server-side errors are
    /// transient; client errors and undecodable documents are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            FeedError::Request(_) | FeedError::EmptyBody => true,
            FeedError::Status(status) => status.is_server_error(),
            FeedError::Decode(_) => false,
        }
    }
}
