//! Human-readable output formatting.

use time::macros::format_description;

use stratus_store::ForecastRow;
use stratus_types::{DateKey, Units};

/// Format a temperature with the unit suffix.
pub fn temperature(value: f64, units: Units) -> String {
    format!("{:.0}{}", value, units.temperature_suffix())
}

/// Format a date key like "Sat, May 17", falling back to the raw key.
pub fn friendly_date(key: &DateKey) -> String {
    let description = format_description!("[weekday repr:short], [month repr:short] [day padding:none]");
    match key.to_date() {
        Ok(date) => date
            .format(&description)
            .unwrap_or_else(|_| key.to_string()),
        Err(_) => key.to_string(),
    }
}

/// One forecast row as a display line.
pub fn forecast_line(row: &ForecastRow, units: Units) -> String {
    format!(
        "{:<12} {:<10} {:>5} / {:<5}  humidity {:>3.0}%  wind {:.1} @ {:.0}°",
        friendly_date(&row.date),
        row.short_desc,
        temperature(row.max_temp, units),
        temperature(row.min_temp, units),
        row.humidity,
        row.wind_speed,
        row.wind_degrees,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ForecastRow {
        ForecastRow {
            id: 1,
            location_setting: "99705".to_string(),
            city_name: "North Pole".to_string(),
            latitude: 64.7488,
            longitude: -147.353,
            date: DateKey::parse("20140517").unwrap(),
            short_desc: "Clear".to_string(),
            condition_id: 800,
            max_temp: 21.5,
            min_temp: 11.0,
            humidity: 45.0,
            pressure: 1013.2,
            wind_speed: 5.5,
            wind_degrees: 310.0,
        }
    }

    #[test]
    fn test_temperature_formatting() {
        assert_eq!(temperature(21.5, Units::Metric), "22°C");
        assert_eq!(temperature(-3.4, Units::Metric), "-3°C");
        assert_eq!(temperature(70.0, Units::Imperial), "70°F");
    }

    #[test]
    fn test_friendly_date() {
        // 2014-05-17 was a Saturday
        let key = DateKey::parse("20140517").unwrap();
        assert_eq!(friendly_date(&key), "Sat, May 17");

        let single_digit = DateKey::parse("20140501").unwrap();
        assert_eq!(friendly_date(&single_digit), "Thu, May 1");
    }

    #[test]
    fn test_forecast_line_contains_fields() {
        let line = forecast_line(&sample_row(), Units::Metric);
        assert!(line.contains("Sat, May 17"));
        assert!(line.contains("Clear"));
        assert!(line.contains("22°C"));
        assert!(line.contains("11°C"));
        assert!(line.contains("45%"));
    }
}
