//! Notification state persistence.
//!
//! The 24-hour notification gate needs one durable value: when the last
//! notification was shown. It lives in its own tiny state file, separate
//! from configuration, because the sync engine writes it while the config
//! file stays user-owned.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Persistent notification state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyState {
    /// Unix timestamp of the last notification shown, if any.
    pub last_notified_at: Option<i64>,
}

impl NotifyState {
    /// Load state from a file; a missing file is an empty state.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StateError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| StateError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| StateError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save state to a file, creating parent directories if needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StateError> {
        let content = toml::to_string_pretty(self).map_err(StateError::Serialize)?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| StateError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        std::fs::write(path.as_ref(), content).map_err(|e| StateError::Write {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// The last-notified instant, if one was recorded and is representable.
    #[must_use]
    pub fn last_notified(&self) -> Option<OffsetDateTime> {
        self.last_notified_at
            .and_then(|ts| OffsetDateTime::from_unix_timestamp(ts).ok())
    }

    /// Record a notification shown at the given instant.
    pub fn record_notified(&mut self, at: OffsetDateTime) {
        self.last_notified_at = Some(at.unix_timestamp());
    }
}

/// Notification state errors.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to read state file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse state file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize state: {0}")]
    Serialize(toml::ser::Error),
    #[error("Failed to write state file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
