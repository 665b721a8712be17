//! Periodic sync scheduling.
//!
//! The scheduler is the component that owns "try again later": it ticks on
//! a fixed interval, runs one engine cycle per tick, and logs failures
//! without retrying inside the tick. Cycles are serialized by construction,
//! one loop driving one engine.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use stratus_feed::ForecastClient;

use crate::engine::SyncEngine;

/// Drives an engine on a fixed interval until stopped.
pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    /// Create a scheduler with the given tick interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Run sync cycles until the stop signal turns true.
    ///
    /// The first cycle runs immediately; subsequent cycles follow the
    /// interval. A failed cycle logs (transient failures at `warn`, the
    /// rest at `error`) and waits for the next tick.
    pub async fn run<C: ForecastClient>(
        &self,
        engine: &mut SyncEngine<C>,
        mut stop: watch::Receiver<bool>,
    ) {
        info!(
            "Starting sync scheduler (interval: {}s)",
            self.interval.as_secs()
        );

        let mut ticker = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match engine.run_once().await {
                        Ok(outcome) => {
                            info!(
                                "Scheduled sync applied {} day(s), pruned {}",
                                outcome.applied, outcome.pruned
                            );
                        }
                        Err(e) if e.is_transient() => {
                            warn!("Sync failed, will retry next tick: {}", e);
                        }
                        Err(e) => {
                            error!("Sync failed: {}", e);
                        }
                    }
                }
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        info!("Sync scheduler stopping");
                        return;
                    }
                }
            }
        }
    }
}
