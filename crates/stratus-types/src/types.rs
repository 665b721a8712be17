//! Core types for forecast data.

use core::fmt;

use time::OffsetDateTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit system requested from the feed and used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Units {
    /// Celsius, hPa, metres per second.
    #[default]
    Metric,
    /// Fahrenheit, hPa, miles per hour.
    Imperial,
}

impl Units {
    /// The token the forecast endpoint expects in its `units` query parameter.
    #[must_use]
    pub fn query_token(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Temperature suffix for human-readable output.
    #[must_use]
    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_token())
    }
}

/// One day of forecast data, already normalized from the wire format.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DailyForecast {
    /// Forecast timestamp from the feed (UTC).
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub timestamp: OffsetDateTime,
    /// Daily maximum temperature.
    pub max_temp: f64,
    /// Daily minimum temperature.
    pub min_temp: f64,
    /// Relative humidity percentage.
    pub humidity: f64,
    /// Atmospheric pressure in hPa.
    pub pressure: f64,
    /// Wind speed.
    pub wind_speed: f64,
    /// Wind direction in degrees.
    pub wind_degrees: f64,
    /// Short condition description (e.g. "Rain").
    pub description: String,
    /// Numeric condition code from the feed.
    pub condition_id: i64,
}

/// A parsed forecast feed: city metadata plus a run of per-day entries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForecastFeed {
    /// City name as reported by the feed.
    pub city_name: String,
    /// City latitude.
    pub latitude: f64,
    /// City longitude.
    pub longitude: f64,
    /// Per-day forecast entries, in feed order (day 0 first).
    pub days: Vec<DailyForecast>,
}
