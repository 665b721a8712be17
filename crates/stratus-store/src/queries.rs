//! Query builder for weather rows.
//!
//! [`ForecastQuery`] follows the builder pattern: start from a location
//! setting, optionally narrow by a start-date floor or an exact day, and
//! pick the sort direction. Queries return weather rows joined with their
//! location.
//!
//! # Example
//!
//! ```
//! use stratus_store::{ForecastQuery, Store};
//! use stratus_types::DateKey;
//!
//! let store = Store::open_in_memory()?;
//!
//! // Everything from a given day onward, oldest first
//! let query = ForecastQuery::for_setting("99705")
//!     .starting_at(DateKey::parse("20140517")?);
//! let rows = store.query_weather(&query)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use stratus_types::DateKey;

use crate::error::{Error, Result};

/// Fluent query builder for weather rows.
///
/// By default, queries return all rows for the location setting ordered by
/// date ascending (chronological). A start-date floor and an exact date are
/// mutually exclusive; asking for both is collaborator misuse and fails at
/// query time with [`Error::InvalidQuery`].
#[derive(Debug, Clone)]
pub struct ForecastQuery {
    /// The location setting to match.
    pub location_setting: String,
    /// Include only rows with date >= this key.
    pub start_date: Option<DateKey>,
    /// Include only the row with exactly this key.
    pub exact_date: Option<DateKey>,
    /// Order by date descending (newest first). Default: false.
    pub newest_first: bool,
    /// Maximum number of results.
    pub limit: Option<u32>,
}

impl ForecastQuery {
    /// Create a query for a location setting with default settings.
    ///
    /// Default behavior:
    /// - No date filter (all days for the location)
    /// - No limit
    /// - Ordered by date ascending
    pub fn for_setting(setting: &str) -> Self {
        Self {
            location_setting: setting.to_string(),
            start_date: None,
            exact_date: None,
            newest_first: false,
            limit: None,
        }
    }

    /// Filter to rows dated at or after this key.
    pub fn starting_at(mut self, date: DateKey) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Filter to the single row for this key.
    pub fn on_date(mut self, date: DateKey) -> Self {
        self.exact_date = Some(date);
        self
    }

    /// Order results by date descending (newest first).
    pub fn newest_first(mut self) -> Self {
        self.newest_first = true;
        self
    }

    /// Limit the maximum number of results returned.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Build the SQL WHERE clause and parameters.
    pub(crate) fn build_where(&self) -> Result<(String, Vec<Box<dyn rusqlite::ToSql>>)> {
        let mut conditions = vec!["locations.location_setting = ?"];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> =
            vec![Box::new(self.location_setting.clone())];

        match (&self.start_date, &self.exact_date) {
            (Some(_), Some(_)) => {
                return Err(Error::InvalidQuery(
                    "start date and exact date are mutually exclusive".to_string(),
                ));
            }
            (Some(start), None) => {
                conditions.push("weather.date >= ?");
                params.push(Box::new(start.as_str().to_string()));
            }
            (None, Some(exact)) => {
                conditions.push("weather.date = ?");
                params.push(Box::new(exact.as_str().to_string()));
            }
            (None, None) => {}
        }

        Ok((format!("WHERE {}", conditions.join(" AND ")), params))
    }

    /// Build the full SQL query.
    pub(crate) fn build_sql(&self) -> Result<String> {
        let (where_clause, _) = self.build_where()?;
        let order = if self.newest_first { "DESC" } else { "ASC" };

        let mut sql = format!(
            "SELECT weather.id, locations.location_setting, locations.city_name, \
             locations.latitude, locations.longitude, weather.date, weather.short_desc, \
             weather.condition_id, weather.max_temp, weather.min_temp, weather.humidity, \
             weather.pressure, weather.wind_speed, weather.wind_degrees \
             FROM weather INNER JOIN locations ON weather.location_id = locations.id \
             {} ORDER BY weather.date {}",
            where_clause, order
        );

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        Ok(sql)
    }
}
