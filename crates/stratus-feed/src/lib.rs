//! Forecast feed acquisition for Stratus.
//!
//! This crate owns the outbound side of a sync cycle: one HTTP GET against
//! a daily-forecast endpoint, strict decoding of the JSON document, and an
//! error taxonomy that separates transient transport failures from broken
//! response shapes.
//!
//! # Example
//!
//! ```no_run
//! use stratus_feed::{ForecastClient, HttpForecastClient};
//! use stratus_types::Units;
//!
//! # async fn run() -> stratus_feed::Result<()> {
//! let client = HttpForecastClient::with_defaults()?;
//! let feed = client.fetch("94043", Units::Metric, 14).await?;
//! println!("{}: {} day(s)", feed.city_name, feed.days.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod models;

pub use client::{FeedConfig, ForecastClient, HttpForecastClient};
pub use error::{FeedError, Result};
pub use models::FeedDocument;
