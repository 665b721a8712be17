//! Data models for stored data.

use serde::{Deserialize, Serialize};

use stratus_types::{DailyForecast, DateKey};

/// A location stored in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLocation {
    /// Database row ID.
    pub id: i64,
    /// The setting string the location was synced for (postal code or place name).
    pub location_setting: String,
    /// City name reported by the feed.
    pub city_name: String,
    /// City latitude.
    pub latitude: f64,
    /// City longitude.
    pub longitude: f64,
}

/// The per-day weather values written during a sync.
///
/// This is the store's input shape; the location association is supplied
/// separately as a row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Day key for the record.
    pub date: DateKey,
    /// Short condition description.
    pub short_desc: String,
    /// Numeric condition code.
    pub condition_id: i64,
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
}

impl From<&DailyForecast> for WeatherRecord {
    fn from(day: &DailyForecast) -> Self {
        Self {
            date: DateKey::from_datetime(day.timestamp),
            short_desc: day.description.clone(),
            condition_id: day.condition_id,
            max_temp: day.max_temp,
            min_temp: day.min_temp,
            humidity: day.humidity,
            pressure: day.pressure,
            wind_speed: day.wind_speed,
            wind_degrees: day.wind_degrees,
        }
    }
}

/// A weather row joined with its location, as returned by read queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    /// Weather row ID.
    pub id: i64,
    /// The joined location's setting string.
    pub location_setting: String,
    /// The joined location's city name.
    pub city_name: String,
    /// The joined location's latitude.
    pub latitude: f64,
    /// The joined location's longitude.
    pub longitude: f64,
    /// Day key for the record.
    pub date: DateKey,
    /// Short condition description.
    pub short_desc: String,
    /// Numeric condition code.
    pub condition_id: i64,
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
}
