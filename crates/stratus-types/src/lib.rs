//! Shared types for the Stratus weather cache.
//!
//! This crate provides the domain types passed between the feed client,
//! the store, and the sync engine, keeping the heavier crates (HTTP,
//! SQLite) out of each other's dependency graphs.
//!
//! # Features
//!
//! - Normalized forecast data types
//! - The canonical `YYYYMMDD` date key used as the store's day key
//! - Error types for data conversion
//!
//! # Example
//!
//! ```
//! use stratus_types::{DateKey, Units};
//!
//! let key = DateKey::from_unix_timestamp(1_400_356_800)?;
//! assert_eq!(key.as_str(), "20140517");
//! assert_eq!(Units::Metric.query_token(), "metric");
//! # Ok::<(), stratus_types::ParseError>(())
//! ```

pub mod date_key;
pub mod error;
pub mod types;

pub use date_key::DateKey;
pub use error::{ParseError, ParseResult};
pub use types::{DailyForecast, ForecastFeed, Units};
