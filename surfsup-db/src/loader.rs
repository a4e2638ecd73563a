//! CSV data loading functions for populating a weather database.
//!
//! Each loader parses CSV data from a string slice and inserts rows into the
//! corresponding table inside a single transaction. The formats match the
//! CSV exports that ship alongside `hawaii.sqlite`.
//!
//! # CSV Formats
//!
//! - **Stations** (has headers): `station,name,latitude,longitude,elevation`
//! - **Measurements** (has headers): `station,date,prcp,tobs`

use crate::Database;
use rusqlite::params;

impl Database {
    /// Load station metadata from CSV string. Returns the number of rows stored.
    ///
    /// Rows with an empty station code are skipped. Re-loading a station code
    /// updates the earlier row in place, keeping its storage position.
    ///
    /// # Example CSV
    /// ```text
    /// station,name,latitude,longitude,elevation
    /// USC00519397,"WAIKIKI 717.2, HI US",21.2716,-157.8168,3.0
    /// ```
    pub fn load_stations(&self, csv_data: &str) -> anyhow::Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0usize;
        let mut skipped = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO station (station, name, latitude, longitude, elevation)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(station) DO UPDATE SET
                     name = excluded.name,
                     latitude = excluded.latitude,
                     longitude = excluded.longitude,
                     elevation = excluded.elevation",
            )?;
            for result in rdr.records() {
                let r = result?;
                let station = r.get(0).unwrap_or("").trim();
                if station.is_empty() {
                    skipped += 1;
                    continue;
                }
                let name = r.get(1).unwrap_or("").trim();
                let latitude: Option<f64> = r.get(2).and_then(|s| s.trim().parse().ok());
                let longitude: Option<f64> = r.get(3).and_then(|s| s.trim().parse().ok());
                let elevation: Option<f64> = r.get(4).and_then(|s| s.trim().parse().ok());

                stmt.execute(params![station, name, latitude, longitude, elevation])?;
                count += 1;
            }
        }
        tx.commit()?;
        log::info!(
            "[surfsup] loader: Loaded {} stations, skipped {}",
            count,
            skipped
        );
        Ok(count)
    }

    /// Load measurements from CSV string. Returns the number of rows stored.
    ///
    /// An empty, non-numeric or non-finite `prcp` is stored as NULL. Rows with an empty
    /// station or date, or a `tobs` that is not a finite number (`NaN`, `inf`),
    /// are skipped.
    /// Fractional `tobs` values (`79.0`) are truncated to integers.
    ///
    /// # Example CSV
    /// ```text
    /// station,date,prcp,tobs
    /// USC00519397,2010-01-01,0.08,65
    /// USC00519397,2010-01-02,,63
    /// ```
    pub fn load_measurements(&self, csv_data: &str) -> anyhow::Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0usize;
        let mut skipped = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for result in rdr.records() {
                let r = result?;
                let station = r.get(0).unwrap_or("").trim();
                let date = r.get(1).unwrap_or("").trim();
                let prcp = r
                    .get(2)
                    .and_then(|s| s.trim().parse::<f64>().ok())
                    .filter(|v| v.is_finite());
                let tobs = match r
                    .get(3)
                    .and_then(|s| s.trim().parse::<f64>().ok())
                    .filter(|v| v.is_finite())
                {
                    Some(v) => v as i64,
                    None => {
                        skipped += 1;
                        continue;
                    }
                };

                if station.is_empty() || date.is_empty() {
                    skipped += 1;
                    continue;
                }

                stmt.execute(params![station, date, prcp, tobs])?;
                count += 1;
            }
        }
        tx.commit()?;
        log::info!(
            "[surfsup] loader: Loaded {} measurements, skipped {}",
            count,
            skipped
        );
        Ok(count)
    }
}
