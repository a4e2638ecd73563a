//! SQL schema definitions for the weather observation database.
//!
//! The layout matches the published `hawaii.sqlite` dataset: a `station`
//! table of observation sites and a `measurement` table of daily readings.
//! The schema is applied as a single batch when a database is created.

/// Tables the service reads from. [`crate::Database::open`] refuses files
/// that lack any of them.
pub const REQUIRED_TABLES: [&str; 2] = ["station", "measurement"];

/// Returns the full SQL schema as a single batch string.
///
/// **Tables:**
/// - `station` - Station metadata (station code, name, latitude, longitude, elevation)
/// - `measurement` - Daily readings (station code, ISO date, precipitation, temperature)
///
/// Dates are stored as `YYYY-MM-DD` text, so lexical comparison in SQL
/// matches chronological order.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS station (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        latitude REAL,
        longitude REAL,
        elevation REAL
    );

    CREATE TABLE IF NOT EXISTS measurement (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp REAL,
        tobs INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_measurement_date ON measurement(date);
    CREATE INDEX IF NOT EXISTS idx_measurement_station ON measurement(station);
    "#
}
