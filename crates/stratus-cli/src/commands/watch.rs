//! Watch command - periodic sync in the foreground.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::info;

use stratus_feed::HttpForecastClient;
use stratus_store::Store;
use stratus_sync::{Config, Scheduler, SyncEngine};

/// Execute the watch command: sync on the configured interval until Ctrl-C.
pub async fn cmd_watch(config: Config) -> Result<()> {
    config.validate()?;

    let store = Store::open(&config.storage.path).context("Failed to open database")?;
    let client =
        HttpForecastClient::new(config.feed.clone()).context("Failed to create feed client")?;

    let interval = Duration::from_secs(config.sync.interval_secs);
    let mut engine = SyncEngine::new(store, client, config);

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("Interrupt received, finishing up");
        let _ = stop_tx.send(true);
    });

    Scheduler::new(interval).run(&mut engine, stop_rx).await;

    Ok(())
}
