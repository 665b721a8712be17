//! Error types for data conversion in stratus-types.

use thiserror::Error;

/// Errors that can occur when converting forecast data.
///
/// This error type is transport-agnostic and does not include
/// HTTP-specific errors (those belong in stratus-feed).
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// An epoch timestamp outside the representable date range.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// A date key that is not eight ASCII digits.
    #[error("Invalid date key: {0}")]
    InvalidDateKey(String),
}

/// Result type alias using stratus-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
