//! Forecast command - read the cached forecast.

use anyhow::{Context, Result};

use stratus_store::{ForecastQuery, Store};
use stratus_sync::Config;
use stratus_types::DateKey;

use crate::commands::OutputFormat;
use crate::format;

/// Execute the forecast command.
pub fn cmd_forecast(
    config: &Config,
    start_date: Option<String>,
    date: Option<String>,
    output: OutputFormat,
) -> Result<()> {
    let store = Store::open(&config.storage.path).context("Failed to open database")?;
    let setting = &config.location.setting;

    let mut query = ForecastQuery::for_setting(setting);
    if let Some(start) = start_date {
        query = query.starting_at(
            DateKey::parse(&start).with_context(|| format!("Invalid start date {start:?}"))?,
        );
    }
    if let Some(exact) = date {
        query = query
            .on_date(DateKey::parse(&exact).with_context(|| format!("Invalid date {exact:?}"))?);
    }

    let rows = store.query_weather(&query)?;

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text => {
            if rows.is_empty() {
                println!("No cached forecast for {setting} - run `stratus sync` first");
                return Ok(());
            }

            println!("{} ({})", rows[0].city_name, setting);
            for row in &rows {
                println!("{}", format::forecast_line(row, config.location.units));
            }
        }
    }

    Ok(())
}
