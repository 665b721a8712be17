use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stratus_sync::Config;

mod commands;
mod format;

use commands::OutputFormat;

#[derive(Parser)]
#[command(name = "stratus")]
#[command(author, version, about = "Local weather-forecast cache and sync", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database path (overrides config)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Location setting to act on (overrides config)
    #[arg(short, long, global = true)]
    location: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the forecast feed and refresh the local cache once
    Sync {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Run periodic sync in the foreground until interrupted
    Watch,

    /// Show the cached forecast for the configured location
    Forecast {
        /// Only days dated at or after this date (YYYYMMDD)
        #[arg(long, conflicts_with = "date")]
        start_date: Option<String>,

        /// Exactly this date (YYYYMMDD)
        #[arg(long)]
        date: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the stored location for the configured setting
    Location {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Delete cached weather dated at or before a cutoff
    Prune {
        /// Cutoff date (YYYYMMDD); defaults to yesterday
        #[arg(long)]
        before: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Sync { format } => commands::sync::cmd_sync(config, format).await,
        Commands::Watch => commands::watch::cmd_watch(config).await,
        Commands::Forecast {
            start_date,
            date,
            format,
        } => commands::forecast::cmd_forecast(&config, start_date, date, format),
        Commands::Location { format } => commands::location::cmd_location(&config, format),
        Commands::Prune { before } => commands::prune::cmd_prune(&config, before),
    }
}

/// Resolve configuration from file and CLI overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_validated(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_default().context("Failed to load default config")?,
    };

    if let Some(database) = &cli.database {
        config.storage.path = database.clone();
    }
    if let Some(setting) = &cli.location {
        config.location.setting = setting.clone();
    }

    Ok(config)
}
