//! Forecast feed client.
//!
//! One outbound GET per sync cycle, no retries. Retry/backoff is the
//! scheduler's responsibility; this layer only classifies failures so the
//! caller can tell transient conditions from broken documents.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use stratus_types::{ForecastFeed, Units};

use crate::error::{FeedError, Result};
use crate::models::FeedDocument;

/// Feed endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Base URL of the daily-forecast endpoint.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5/forecast/daily".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: 30,
        }
    }
}

/// A source of forecast feeds.
///
/// The sync engine talks to this trait so tests can substitute a canned
/// feed for the HTTP client.
#[async_trait]
pub trait ForecastClient: Send + Sync {
    /// Fetch a multi-day forecast for a location setting.
    async fn fetch(&self, setting: &str, units: Units, days: u32) -> Result<ForecastFeed>;
}

/// HTTP implementation of [`ForecastClient`].
#[derive(Debug)]
pub struct HttpForecastClient {
    client: reqwest::Client,
    config: FeedConfig,
}

impl HttpForecastClient {
    /// Create a client with the given configuration.
    pub fn new(config: FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(FeedConfig::default())
    }
}

#[async_trait]
impl ForecastClient for HttpForecastClient {
    async fn fetch(&self, setting: &str, units: Units, days: u32) -> Result<ForecastFeed> {
        debug!(
            "Fetching forecast for {:?} ({} days, {})",
            setting, days, units
        );

        let count = days.to_string();
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("q", setting),
                ("mode", "json"),
                ("units", units.query_token()),
                ("cnt", count.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(FeedError::EmptyBody);
        }

        let document: FeedDocument =
            serde_json::from_str(&body).map_err(|e| FeedError::Decode(e.to_string()))?;

        let feed = document.into_feed()?;
        debug!(
            "Fetched {} day(s) for {} ({}, {})",
            feed.days.len(),
            feed.city_name,
            feed.latitude,
            feed.longitude
        );

        Ok(feed)
    }
}
