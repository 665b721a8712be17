//! Sync configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use stratus_feed::FeedConfig;
use stratus_types::Units;

/// Sync configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location settings.
    pub location: LocationConfig,
    /// Feed endpoint settings.
    pub feed: FeedConfig,
    /// Storage settings.
    pub storage: StorageConfig,
    /// Sync cadence settings.
    pub sync: SyncConfig,
    /// Notification settings.
    pub notifications: NotificationConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = default_config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Save configuration to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        // Create parent directories if needed
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Write {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Validate the configuration and return any errors.
    ///
    /// This checks:
    /// - Location setting is not empty
    /// - Feed base URL is not empty and day count is within 1-16
    /// - Storage path is not empty
    /// - Sync interval is within reasonable bounds (5 minutes - 1 day)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        errors.extend(self.location.validate());
        errors.extend(self.sync.validate());
        errors.extend(self.storage.validate());

        if self.feed.base_url.is_empty() {
            errors.push(ValidationError {
                field: "feed.base_url".to_string(),
                message: "feed base URL cannot be empty".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load and validate configuration from a file.
    ///
    /// This is a convenience method that combines `load()` and `validate()`.
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }
}

/// Location preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// The location setting synced against (postal code or place name).
    pub setting: String,
    /// Unit system requested from the feed.
    pub units: Units,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            setting: "94043".to_string(),
            units: Units::Metric,
        }
    }
}

impl LocationConfig {
    /// Validate location configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.setting.trim().is_empty() {
            errors.push(ValidationError {
                field: "location.setting".to_string(),
                message: "location setting cannot be empty".to_string(),
            });
        }

        errors
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: stratus_store::default_db_path(),
        }
    }
}

impl StorageConfig {
    /// Validate storage configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.path.as_os_str().is_empty() {
            errors.push(ValidationError {
                field: "storage.path".to_string(),
                message: "database path cannot be empty".to_string(),
            });
        }

        errors
    }
}

/// Sync cadence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Seconds between scheduled sync cycles.
    pub interval_secs: u64,
    /// Number of forecast days requested per cycle.
    pub forecast_days: u32,
}

/// Minimum sync interval in seconds (5 minutes).
pub const MIN_SYNC_INTERVAL: u64 = 300;
/// Maximum sync interval in seconds (1 day).
pub const MAX_SYNC_INTERVAL: u64 = 86_400;

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            // Three hours, the cadence the periodic scheduler was tuned for.
            interval_secs: 10_800,
            forecast_days: 14,
        }
    }
}

impl SyncConfig {
    /// Validate sync configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.interval_secs < MIN_SYNC_INTERVAL {
            errors.push(ValidationError {
                field: "sync.interval_secs".to_string(),
                message: format!(
                    "sync interval {} is too short (minimum {} seconds)",
                    self.interval_secs, MIN_SYNC_INTERVAL
                ),
            });
        } else if self.interval_secs > MAX_SYNC_INTERVAL {
            errors.push(ValidationError {
                field: "sync.interval_secs".to_string(),
                message: format!(
                    "sync interval {} is too long (maximum {} seconds / 1 day)",
                    self.interval_secs, MAX_SYNC_INTERVAL
                ),
            });
        }

        if self.forecast_days == 0 || self.forecast_days > 16 {
            errors.push(ValidationError {
                field: "sync.forecast_days".to_string(),
                message: format!(
                    "forecast day count {} is out of range (1-16)",
                    self.forecast_days
                ),
            });
        }

        errors
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Whether sync cycles may emit notification events.
    pub enabled: bool,
    /// Path of the file recording when the last notification was shown.
    pub state_path: PathBuf,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            state_path: default_state_path(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// A single validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field path (e.g., `location.setting`).
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Default configuration file path.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stratus")
        .join("config.toml")
}

/// Default notification state file path.
pub fn default_state_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stratus")
        .join("notify.toml")
}
