//! Wire-format models for the forecast feed.
//!
//! The feed is a JSON document with a `city` object and a `list` array of
//! per-day entries. Deserialization is strict: every field named here is
//! required, so a missing or mistyped field fails the whole document rather
//! than producing a partial forecast.

use serde::Deserialize;
use time::OffsetDateTime;

use stratus_types::{DailyForecast, ForecastFeed};

use crate::error::FeedError;

/// Top-level feed document.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedDocument {
    /// City metadata.
    pub city: FeedCity,
    /// Per-day forecast entries.
    pub list: Vec<FeedEntry>,
}

/// City metadata block.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedCity {
    pub name: String,
    pub coord: FeedCoord,
}

/// City coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedCoord {
    pub lat: f64,
    pub lon: f64,
}

/// One per-day entry of the `list` array.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEntry {
    /// Forecast time as epoch seconds.
    pub dt: i64,
    pub pressure: f64,
    pub humidity: f64,
    /// Wind speed.
    pub speed: f64,
    /// Wind direction in degrees.
    pub deg: f64,
    pub temp: FeedTemperature,
    /// Condition descriptors; the first element is authoritative.
    pub weather: Vec<FeedCondition>,
}

/// Min/max temperature block of an entry.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedTemperature {
    pub max: f64,
    pub min: f64,
}

/// A condition descriptor inside an entry's `weather` array.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedCondition {
    /// Short description, e.g. "Rain".
    pub main: String,
    /// Numeric condition code.
    pub id: i64,
}

impl FeedDocument {
    /// Convert the wire document into the normalized [`ForecastFeed`].
    ///
    /// Fails if any entry lacks a condition descriptor or carries an epoch
    /// timestamp outside the representable range.
    pub fn into_feed(self) -> Result<ForecastFeed, FeedError> {
        let days = self
            .list
            .into_iter()
            .map(FeedEntry::into_daily)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ForecastFeed {
            city_name: self.city.name,
            latitude: self.city.coord.lat,
            longitude: self.city.coord.lon,
            days,
        })
    }
}

impl FeedEntry {
    fn into_daily(self) -> Result<DailyForecast, FeedError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| FeedError::Decode("entry has no weather condition".to_string()))?;

        let timestamp = OffsetDateTime::from_unix_timestamp(self.dt)
            .map_err(|_| FeedError::Decode(format!("timestamp {} out of range", self.dt)))?;

        Ok(DailyForecast {
            timestamp,
            max_temp: self.temp.max,
            min_temp: self.temp.min,
            humidity: self.humidity,
            pressure: self.pressure,
            wind_speed: self.speed,
            wind_degrees: self.deg,
            description: condition.main,
            condition_id: condition.id,
        })
    }
}
