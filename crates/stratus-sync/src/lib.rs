//! Forecast synchronization for Stratus.
//!
//! This crate ties the feed client and the store together into the refresh
//! cycle: fetch, upsert the location, replace the day batch transactionally,
//! prune stale days, and gate a once-per-24h notification event.
//!
//! # Configuration
//!
//! The engine reads configuration from `~/.config/stratus/config.toml`:
//!
//! ```toml
//! [location]
//! setting = "99705"
//! units = "metric"
//!
//! [sync]
//! interval_secs = 10800
//! forecast_days = 14
//!
//! [notifications]
//! enabled = true
//! ```
//!
//! # Example
//!
//! ```no_run
//! use stratus_feed::HttpForecastClient;
//! use stratus_store::Store;
//! use stratus_sync::{Config, SyncEngine};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load_default()?;
//! let store = Store::open(&config.storage.path)?;
//! let client = HttpForecastClient::new(config.feed.clone())?;
//!
//! let mut engine = SyncEngine::new(store, client, config);
//! let outcome = engine.run_once().await?;
//! println!("applied {} day(s)", outcome.applied);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod notify;
pub mod scheduler;
pub mod state;

pub use config::{Config, ConfigError, LocationConfig, NotificationConfig, StorageConfig, SyncConfig};
pub use engine::{SyncEngine, SyncError, SyncOutcome};
pub use notify::{LogNotifier, NotificationEvent, Notifier, should_notify};
pub use scheduler::Scheduler;
pub use state::{NotifyState, StateError};
