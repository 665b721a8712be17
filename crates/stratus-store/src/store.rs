//! Main store implementation.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use stratus_types::DateKey;

use crate::error::{Error, Result};
use crate::models::{ForecastRow, StoredLocation, WeatherRecord};
use crate::queries::ForecastQuery;
use crate::schema;

const WEATHER_INSERT: &str = "INSERT OR REPLACE INTO weather \
    (location_id, date, short_desc, condition_id, max_temp, min_temp, \
     humidity, pressure, wind_speed, wind_degrees) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

/// SQLite-based store for weather data.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // Foreign keys keep weather rows attached to a real location; WAL
        // lets readers run while a sync transaction is open.
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        schema::initialize(&conn)?;

        Ok(Self { conn })
    }
}

// Location operations
impl Store {
    /// Look up a location by its setting string.
    ///
    /// An unknown setting yields `Ok(None)`, not an error.
    pub fn find_location(&self, setting: &str) -> Result<Option<StoredLocation>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, location_setting, city_name, latitude, longitude
             FROM locations WHERE location_setting = ?",
        )?;

        let location = stmt
            .query_row([setting], |row| {
                Ok(StoredLocation {
                    id: row.get(0)?,
                    location_setting: row.get(1)?,
                    city_name: row.get(2)?,
                    latitude: row.get(3)?,
                    longitude: row.get(4)?,
                })
            })
            .optional()?;

        Ok(location)
    }

    /// Get or create the location row for a setting, returning its id.
    ///
    /// When the setting already exists its metadata is left untouched; a
    /// re-sync never rewrites city name or coordinates. The insert-or-ignore
    /// plus lookup shape means two concurrent upserts for the same setting
    /// converge on one row.
    pub fn upsert_location(
        &self,
        setting: &str,
        city_name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO locations (location_setting, city_name, latitude, longitude)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(location_setting) DO NOTHING",
            rusqlite::params![setting, city_name, latitude, longitude],
        )?;

        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM locations WHERE location_setting = ?",
                [setting],
                |row| row.get(0),
            )
            .optional()?;

        id.ok_or_else(|| Error::LocationNotFound(setting.to_string()))
    }
}

// Weather operations
impl Store {
    /// Insert or overwrite the weather row for one (location, date) pair.
    ///
    /// Last write wins; the natural-key constraint guarantees a single row.
    pub fn replace_weather_for_date(&self, location_id: i64, record: &WeatherRecord) -> Result<()> {
        self.conn.execute(
            WEATHER_INSERT,
            rusqlite::params![
                location_id,
                record.date.as_str(),
                record.short_desc,
                record.condition_id,
                record.max_temp,
                record.min_temp,
                record.humidity,
                record.pressure,
                record.wind_speed,
                record.wind_degrees,
            ],
        )?;
        Ok(())
    }

    /// Replace a batch of weather rows as a single unit.
    ///
    /// The whole batch runs inside one transaction: either every record is
    /// applied (and the count returned) or the transaction rolls back and
    /// nothing is. Readers on other connections see the pre-batch or
    /// post-batch state, never a partial one.
    pub fn bulk_replace_weather(
        &self,
        location_id: i64,
        records: &[WeatherRecord],
    ) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;

        {
            let mut stmt = tx.prepare(WEATHER_INSERT)?;
            for record in records {
                stmt.execute(rusqlite::params![
                    location_id,
                    record.date.as_str(),
                    record.short_desc,
                    record.condition_id,
                    record.max_temp,
                    record.min_temp,
                    record.humidity,
                    record.pressure,
                    record.wind_speed,
                    record.wind_degrees,
                ])?;
            }
        }

        tx.commit()?;

        info!(
            "Replaced {} weather row(s) for location {}",
            records.len(),
            location_id
        );
        Ok(records.len())
    }

    /// Query weather rows joined with their location.
    pub fn query_weather(&self, query: &ForecastQuery) -> Result<Vec<ForecastRow>> {
        let sql = query.build_sql()?;
        let (_, params) = query.build_where()?;

        debug!("Executing query: {}", sql);

        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_and_then(params_ref.as_slice(), |row| -> Result<ForecastRow> {
                Ok(ForecastRow {
                    id: row.get(0)?,
                    location_setting: row.get(1)?,
                    city_name: row.get(2)?,
                    latitude: row.get(3)?,
                    longitude: row.get(4)?,
                    date: DateKey::parse(&row.get::<_, String>(5)?)?,
                    short_desc: row.get(6)?,
                    condition_id: row.get(7)?,
                    max_temp: row.get(8)?,
                    min_temp: row.get(9)?,
                    humidity: row.get(10)?,
                    pressure: row.get(11)?,
                    wind_speed: row.get(12)?,
                    wind_degrees: row.get(13)?,
                })
            })?
            .collect::<Result<Vec<_>>>()?;

        Ok(rows)
    }

    /// Delete weather rows dated at or before the cutoff, across all
    /// locations. Returns the number of rows deleted; a repeat run with the
    /// same cutoff deletes nothing.
    pub fn prune_older_than(&self, cutoff: &DateKey) -> Result<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM weather WHERE date <= ?",
            [cutoff.as_str()],
        )?;

        info!("Pruned {} weather row(s) up to {}", deleted, cutoff);
        Ok(deleted)
    }

    /// Count weather rows, optionally for a single location setting.
    pub fn count_weather(&self, setting: Option<&str>) -> Result<u64> {
        let count: i64 = match setting {
            Some(s) => self.conn.query_row(
                "SELECT COUNT(*) FROM weather
                 INNER JOIN locations ON weather.location_id = locations.id
                 WHERE locations.location_setting = ?",
                [s],
                |row| row.get(0),
            )?,
            None => self
                .conn
                .query_row("SELECT COUNT(*) FROM weather", [], |row| row.get(0))?,
        };

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, desc: &str) -> WeatherRecord {
        WeatherRecord {
            date: DateKey::parse(date).unwrap(),
            short_desc: desc.to_string(),
            condition_id: 800,
            max_temp: 21.5,
            min_temp: 11.0,
            humidity: 45.0,
            pressure: 1013.2,
            wind_speed: 5.5,
            wind_degrees: 310.0,
        }
    }

    fn north_pole(store: &Store) -> i64 {
        store
            .upsert_location("99705", "North Pole", 64.7488, -147.353)
            .unwrap()
    }

    #[test]
    fn test_open_in_memory() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.count_weather(None).unwrap(), 0);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("weather.db");
        let store = Store::open(&path).unwrap();
        assert_eq!(store.count_weather(None).unwrap(), 0);
        assert!(path.exists());
    }

    #[test]
    fn test_find_location_unknown_returns_none() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.find_location("nowhere").unwrap().is_none());
    }

    #[test]
    fn test_upsert_location_creates_and_finds() {
        let store = Store::open_in_memory().unwrap();
        let id = north_pole(&store);

        let location = store.find_location("99705").unwrap().unwrap();
        assert_eq!(location.id, id);
        assert_eq!(location.city_name, "North Pole");
        assert!((location.latitude - 64.7488).abs() < 1e-9);
        assert!((location.longitude - -147.353).abs() < 1e-9);
    }

    #[test]
    fn test_upsert_location_twice_returns_same_id() {
        let store = Store::open_in_memory().unwrap();

        let first = north_pole(&store);
        // Different metadata, same setting: id is stable, no second row
        let second = store
            .upsert_location("99705", "Santa Claus House", 0.0, 0.0)
            .unwrap();
        assert_eq!(first, second);

        let count: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM locations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);

        // Existing metadata is left untouched
        let location = store.find_location("99705").unwrap().unwrap();
        assert_eq!(location.city_name, "North Pole");
    }

    #[test]
    fn test_upsert_location_distinct_settings_get_distinct_rows() {
        let store = Store::open_in_memory().unwrap();
        let a = north_pole(&store);
        let b = store
            .upsert_location("94043", "Mountain View", 37.4, -122.1)
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_replace_weather_for_date_overwrites() {
        let store = Store::open_in_memory().unwrap();
        let id = north_pole(&store);

        store
            .replace_weather_for_date(id, &record("20140517", "Clear"))
            .unwrap();
        let mut updated = record("20140517", "Rain");
        updated.max_temp = 15.0;
        store.replace_weather_for_date(id, &updated).unwrap();

        let rows = store
            .query_weather(&ForecastQuery::for_setting("99705"))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].short_desc, "Rain");
        assert!((rows[0].max_temp - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_bulk_replace_weather() {
        let store = Store::open_in_memory().unwrap();
        let id = north_pole(&store);

        let records = vec![
            record("20140517", "Clear"),
            record("20140518", "Rain"),
            record("20140519", "Clouds"),
        ];
        let applied = store.bulk_replace_weather(id, &records).unwrap();
        assert_eq!(applied, 3);
        assert_eq!(store.count_weather(Some("99705")).unwrap(), 3);
    }

    #[test]
    fn test_bulk_replace_overwrites_existing_dates() {
        let store = Store::open_in_memory().unwrap();
        let id = north_pole(&store);

        store
            .replace_weather_for_date(id, &record("20140518", "Snow"))
            .unwrap();

        let records = vec![record("20140517", "Clear"), record("20140518", "Rain")];
        store.bulk_replace_weather(id, &records).unwrap();

        let rows = store
            .query_weather(&ForecastQuery::for_setting("99705"))
            .unwrap();
        assert_eq!(rows.len(), 2);
        let day = rows.iter().find(|r| r.date.as_str() == "20140518").unwrap();
        assert_eq!(day.short_desc, "Rain");
    }

    #[test]
    fn test_bulk_replace_is_all_or_nothing() {
        let store = Store::open_in_memory().unwrap();
        north_pole(&store);

        // No such location row; the foreign key rejects the batch and the
        // transaction rolls back without applying anything.
        let records = vec![record("20140517", "Clear"), record("20140518", "Rain")];
        let result = store.bulk_replace_weather(9999, &records);
        assert!(result.is_err());
        assert_eq!(store.count_weather(None).unwrap(), 0);
    }

    #[test]
    fn test_query_weather_start_date_filters_and_sorts() {
        let store = Store::open_in_memory().unwrap();
        let id = north_pole(&store);

        // Insert out of order
        let records = vec![
            record("20140519", "Clouds"),
            record("20140516", "Snow"),
            record("20140518", "Rain"),
            record("20140517", "Clear"),
        ];
        store.bulk_replace_weather(id, &records).unwrap();

        let query =
            ForecastQuery::for_setting("99705").starting_at(DateKey::parse("20140517").unwrap());
        let rows = store.query_weather(&query).unwrap();

        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["20140517", "20140518", "20140519"]);
    }

    #[test]
    fn test_query_weather_exact_date() {
        let store = Store::open_in_memory().unwrap();
        let id = north_pole(&store);
        store
            .bulk_replace_weather(id, &[record("20140517", "Clear"), record("20140518", "Rain")])
            .unwrap();

        let query =
            ForecastQuery::for_setting("99705").on_date(DateKey::parse("20140518").unwrap());
        let rows = store.query_weather(&query).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].short_desc, "Rain");

        let query =
            ForecastQuery::for_setting("99705").on_date(DateKey::parse("20140520").unwrap());
        assert!(store.query_weather(&query).unwrap().is_empty());
    }

    #[test]
    fn test_query_weather_unknown_setting_is_empty() {
        let store = Store::open_in_memory().unwrap();
        let id = north_pole(&store);
        store
            .replace_weather_for_date(id, &record("20140517", "Clear"))
            .unwrap();

        let rows = store
            .query_weather(&ForecastQuery::for_setting("nowhere"))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_query_weather_rejects_conflicting_filters() {
        let store = Store::open_in_memory().unwrap();
        let query = ForecastQuery::for_setting("99705")
            .starting_at(DateKey::parse("20140517").unwrap())
            .on_date(DateKey::parse("20140518").unwrap());

        assert!(matches!(
            store.query_weather(&query),
            Err(Error::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_query_weather_joins_location_fields() {
        let store = Store::open_in_memory().unwrap();
        let id = north_pole(&store);
        store
            .replace_weather_for_date(id, &record("20140517", "Clear"))
            .unwrap();

        let rows = store
            .query_weather(&ForecastQuery::for_setting("99705"))
            .unwrap();
        assert_eq!(rows[0].location_setting, "99705");
        assert_eq!(rows[0].city_name, "North Pole");
        assert!((rows[0].latitude - 64.7488).abs() < 1e-9);
    }

    #[test]
    fn test_query_weather_scoped_to_location() {
        let store = Store::open_in_memory().unwrap();
        let a = north_pole(&store);
        let b = store
            .upsert_location("94043", "Mountain View", 37.4, -122.1)
            .unwrap();

        store
            .replace_weather_for_date(a, &record("20140517", "Snow"))
            .unwrap();
        store
            .replace_weather_for_date(b, &record("20140517", "Clear"))
            .unwrap();

        let rows = store
            .query_weather(&ForecastQuery::for_setting("94043"))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].short_desc, "Clear");
    }

    #[test]
    fn test_query_weather_newest_first() {
        let store = Store::open_in_memory().unwrap();
        let id = north_pole(&store);
        store
            .bulk_replace_weather(id, &[record("20140517", "Clear"), record("20140518", "Rain")])
            .unwrap();

        let rows = store
            .query_weather(&ForecastQuery::for_setting("99705").newest_first())
            .unwrap();
        assert_eq!(rows[0].date.as_str(), "20140518");
    }

    #[test]
    fn test_prune_older_than() {
        let store = Store::open_in_memory().unwrap();
        let id = north_pole(&store);
        store
            .bulk_replace_weather(
                id,
                &[
                    record("20140515", "Snow"),
                    record("20140516", "Clouds"),
                    record("20140517", "Clear"),
                    record("20140518", "Rain"),
                ],
            )
            .unwrap();

        // Cutoff is inclusive: the 16th goes, the 17th stays
        let cutoff = DateKey::parse("20140516").unwrap();
        let deleted = store.prune_older_than(&cutoff).unwrap();
        assert_eq!(deleted, 2);

        let dates: Vec<String> = store
            .query_weather(&ForecastQuery::for_setting("99705"))
            .unwrap()
            .iter()
            .map(|r| r.date.as_str().to_string())
            .collect();
        assert_eq!(dates, vec!["20140517", "20140518"]);
    }

    #[test]
    fn test_prune_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        let id = north_pole(&store);
        store
            .replace_weather_for_date(id, &record("20140515", "Snow"))
            .unwrap();

        let cutoff = DateKey::parse("20140516").unwrap();
        assert_eq!(store.prune_older_than(&cutoff).unwrap(), 1);
        assert_eq!(store.prune_older_than(&cutoff).unwrap(), 0);
    }

    #[test]
    fn test_prune_empty_store_deletes_nothing() {
        let store = Store::open_in_memory().unwrap();
        let cutoff = DateKey::parse("20140516").unwrap();
        assert_eq!(store.prune_older_than(&cutoff).unwrap(), 0);
    }

    #[test]
    fn test_count_weather_per_setting() {
        let store = Store::open_in_memory().unwrap();
        let a = north_pole(&store);
        let b = store
            .upsert_location("94043", "Mountain View", 37.4, -122.1)
            .unwrap();

        store
            .bulk_replace_weather(a, &[record("20140517", "Clear"), record("20140518", "Rain")])
            .unwrap();
        store
            .replace_weather_for_date(b, &record("20140517", "Clear"))
            .unwrap();

        assert_eq!(store.count_weather(Some("99705")).unwrap(), 2);
        assert_eq!(store.count_weather(Some("94043")).unwrap(), 1);
        assert_eq!(store.count_weather(None).unwrap(), 3);
    }
}
