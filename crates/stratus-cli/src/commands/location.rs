//! Location command - show the stored location row.

use anyhow::{Context, Result};

use stratus_store::Store;
use stratus_sync::Config;

use crate::commands::OutputFormat;

/// Execute the location command.
pub fn cmd_location(config: &Config, output: OutputFormat) -> Result<()> {
    let store = Store::open(&config.storage.path).context("Failed to open database")?;
    let setting = &config.location.setting;

    let Some(location) = store.find_location(setting)? else {
        println!("No location cached for {setting} - run `stratus sync` first");
        return Ok(());
    };

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&location)?);
        }
        OutputFormat::Text => {
            println!("Setting: {}", location.location_setting);
            println!("City: {}", location.city_name);
            println!(
                "Coordinates: {:.4}, {:.4}",
                location.latitude, location.longitude
            );
        }
    }

    Ok(())
}
