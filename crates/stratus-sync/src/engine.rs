//! The sync engine.
//!
//! One call to [`SyncEngine::run_once`] is one complete refresh cycle:
//! fetch the feed, upsert the location, replace the batch of weather rows
//! in a single transaction, prune stale days, and decide whether to notify.
//! There is no retry loop here; a failed cycle aborts cleanly and the
//! scheduler (or the user) tries again later.

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use stratus_feed::{FeedError, ForecastClient};
use stratus_store::{Store, WeatherRecord};
use stratus_types::DateKey;

use crate::config::Config;
use crate::notify::{LogNotifier, NotificationEvent, Notifier, should_notify};
use crate::state::{NotifyState, StateError};

/// Errors that can abort a sync cycle.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Fetching or decoding the feed failed; nothing was written.
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// A storage operation failed.
    #[error("Storage error: {0}")]
    Store(#[from] stratus_store::Error),

    /// Reading or writing the notification state file failed.
    #[error("Notification state error: {0}")]
    State(#[from] StateError),
}

impl SyncError {
    /// Whether a later retry could plausibly succeed without intervention.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, SyncError::Feed(e) if e.is_transient())
    }
}

/// What one sync cycle did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncOutcome {
    /// Row id of the synced location.
    pub location_id: i64,
    /// Days present in the fetched feed.
    pub fetched: usize,
    /// Weather rows written.
    pub applied: usize,
    /// Stale rows removed.
    pub pruned: usize,
    /// Whether a notification event was emitted.
    pub notified: bool,
}

/// Runs sync cycles against a store and a feed client.
///
/// The engine takes `&mut self` for a cycle; at most one cycle runs at a
/// time by construction.
pub struct SyncEngine<C: ForecastClient> {
    store: Store,
    client: C,
    notifier: Box<dyn Notifier>,
    config: Config,
}

impl<C: ForecastClient> SyncEngine<C> {
    /// Create an engine that logs notification events.
    pub fn new(store: Store, client: C, config: Config) -> Self {
        Self {
            store,
            client,
            notifier: Box::new(LogNotifier),
            config,
        }
    }

    /// Replace the notification sink.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// The engine's store, for read queries after a cycle.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The engine's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one complete sync cycle.
    pub async fn run_once(&mut self) -> Result<SyncOutcome, SyncError> {
        let setting = self.config.location.setting.clone();
        let units = self.config.location.units;
        let days = self.config.sync.forecast_days;

        info!("Starting sync for {:?}", setting);

        // Any fetch or decode failure aborts here, before any write.
        let feed = self.client.fetch(&setting, units, days).await?;

        let location_id = self.store.upsert_location(
            &setting,
            &feed.city_name,
            feed.latitude,
            feed.longitude,
        )?;

        let records: Vec<WeatherRecord> = feed.days.iter().map(WeatherRecord::from).collect();

        if records.is_empty() {
            warn!("Feed returned no forecast days for {:?}", setting);
            return Ok(SyncOutcome {
                location_id,
                fetched: 0,
                applied: 0,
                pruned: 0,
                notified: false,
            });
        }

        let applied = self.store.bulk_replace_weather(location_id, &records)?;

        // Retention cutoff is yesterday: the prune drops yesterday and older.
        let pruned = match OffsetDateTime::now_utc().date().previous_day() {
            Some(yesterday) => self.store.prune_older_than(&DateKey::from_date(yesterday))?,
            None => 0,
        };

        let notified = self.maybe_notify(&records[0])?;

        info!(
            "Sync complete for {:?}: {} day(s) applied, {} pruned",
            setting, applied, pruned
        );

        Ok(SyncOutcome {
            location_id,
            fetched: records.len(),
            applied,
            pruned,
            notified,
        })
    }

    /// Emit a day-0 notification if enabled and the last one is stale.
    fn maybe_notify(&self, day0: &WeatherRecord) -> Result<bool, SyncError> {
        if !self.config.notifications.enabled {
            return Ok(false);
        }

        let path = &self.config.notifications.state_path;
        let mut state = NotifyState::load(path)?;
        let now = OffsetDateTime::now_utc();

        if !should_notify(now, state.last_notified(), true) {
            debug!("Notification suppressed; last one is under 24h old");
            return Ok(false);
        }

        self.notifier.notify(&NotificationEvent {
            description: day0.short_desc.clone(),
            max_temp: day0.max_temp,
            min_temp: day0.min_temp,
            condition_id: day0.condition_id,
        });

        state.record_notified(now);
        state.save(path)?;

        Ok(true)
    }
}
