//! Sync command - run one refresh cycle.

use anyhow::{Context, Result};

use stratus_feed::HttpForecastClient;
use stratus_store::Store;
use stratus_sync::{Config, SyncEngine};

use crate::commands::OutputFormat;

/// Execute the sync command.
pub async fn cmd_sync(config: Config, format: OutputFormat) -> Result<()> {
    config.validate()?;

    let store = Store::open(&config.storage.path).context("Failed to open database")?;
    let client =
        HttpForecastClient::new(config.feed.clone()).context("Failed to create feed client")?;

    let setting = config.location.setting.clone();
    let mut engine = SyncEngine::new(store, client, config);

    let outcome = engine
        .run_once()
        .await
        .with_context(|| format!("Sync failed for {setting:?}"))?;

    let total_cached = engine.store().count_weather(Some(&setting))?;

    match format {
        OutputFormat::Json => {
            let result = serde_json::json!({
                "location": setting,
                "fetched": outcome.fetched,
                "applied": outcome.applied,
                "pruned": outcome.pruned,
                "notified": outcome.notified,
                "total_cached": total_cached,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => {
            println!("Synced {} day(s) for {}", outcome.applied, setting);
            println!("Pruned: {} stale row(s)", outcome.pruned);
            println!("Total cached: {}", total_cached);
            if outcome.notified {
                println!("Notification emitted for today's forecast");
            }
        }
    }

    Ok(())
}
