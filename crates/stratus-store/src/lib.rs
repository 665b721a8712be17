//! Local data persistence for Stratus weather data.
//!
//! This crate provides SQLite-based storage for synced forecasts,
//! enabling offline reads and keyed replace-on-conflict writes.
//!
//! # Features
//!
//! - Locations keyed by the user's location setting
//! - Per-day weather rows with a (location, date) natural key
//! - Transactional bulk replace for whole sync batches
//! - Joined read queries with date filters
//! - Retention pruning by date cutoff
//!
//! # Example
//!
//! ```no_run
//! use stratus_store::{ForecastQuery, Store};
//!
//! let store = Store::open_default()?;
//!
//! // Query the cached forecast for a location
//! let query = ForecastQuery::for_setting("99705");
//! let rows = store.query_weather(&query)?;
//! # Ok::<(), stratus_store::Error>(())
//! ```

mod error;
mod models;
mod queries;
mod schema;
mod store;

pub use error::{Error, Result};
pub use models::{ForecastRow, StoredLocation, WeatherRecord};
pub use queries::ForecastQuery;
pub use store::Store;

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/stratus/weather.db`
/// - macOS: `~/Library/Application Support/stratus/weather.db`
/// - Windows: `C:\Users\<user>\AppData\Local\stratus\weather.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("stratus")
        .join("weather.db")
}
