//! Prune command - drop stale cached weather.

use anyhow::{Context, Result, bail};
use time::OffsetDateTime;

use stratus_store::Store;
use stratus_sync::Config;
use stratus_types::DateKey;

/// Execute the prune command.
pub fn cmd_prune(config: &Config, before: Option<String>) -> Result<()> {
    let store = Store::open(&config.storage.path).context("Failed to open database")?;

    let cutoff = match before {
        Some(s) => DateKey::parse(&s).with_context(|| format!("Invalid cutoff date {s:?}"))?,
        None => {
            let Some(yesterday) = OffsetDateTime::now_utc().date().previous_day() else {
                bail!("Cannot compute a default cutoff");
            };
            DateKey::from_date(yesterday)
        }
    };

    let deleted = store.prune_older_than(&cutoff)?;
    println!("Deleted {deleted} row(s) dated {cutoff} or earlier");

    Ok(())
}
