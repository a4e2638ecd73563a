//! Typed query methods for retrieving weather observations.
//!
//! Dates are compared as `YYYY-MM-DD` text. Callers pass date bounds through
//! unvalidated: a malformed bound simply matches nothing.
//!
//! `tobs` is cast to integer on the way out so that databases declaring the
//! column as `FLOAT` (the published dataset does) are served unchanged.

use crate::models::{DatePrecipitation, DateTemperature, StationInfo, TemperatureStats};
use crate::Database;
use rusqlite::params;

impl Database {
    /// Get the most recent measurement date, or `None` if there are no
    /// measurements at all.
    pub fn query_most_recent_date(&self) -> anyhow::Result<Option<String>> {
        let conn = self.conn()?;
        let latest: Option<String> =
            conn.query_row("SELECT MAX(date) FROM measurement", [], |row| row.get(0))?;
        log::info!("[surfsup] query: query_most_recent_date returned {:?}", latest);
        Ok(latest)
    }

    /// Get all precipitation readings on or after `start_date`.
    ///
    /// Ordered chronologically; readings sharing a date keep storage order.
    pub fn query_precipitation_since(
        &self,
        start_date: &str,
    ) -> anyhow::Result<Vec<DatePrecipitation>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT date, prcp FROM measurement
             WHERE date >= ?1
             ORDER BY date, id",
        )?;
        let rows = stmt
            .query_map(params![start_date], |row| {
                Ok(DatePrecipitation {
                    date: row.get(0)?,
                    prcp: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[surfsup] query: query_precipitation_since returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Get every station in storage order.
    pub fn query_stations(&self) -> anyhow::Result<Vec<StationInfo>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT station, name FROM station ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StationInfo {
                    station: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[surfsup] query: query_stations returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Get temperature observations for one station on or after `start_date`,
    /// ordered chronologically.
    pub fn query_station_temperatures_since(
        &self,
        station: &str,
        start_date: &str,
    ) -> anyhow::Result<Vec<DateTemperature>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT date, CAST(tobs AS INTEGER) FROM measurement
             WHERE station = ?1 AND date >= ?2
             ORDER BY date, id",
        )?;
        let rows = stmt
            .query_map(params![station, start_date], |row| {
                Ok(DateTemperature {
                    date: row.get(0)?,
                    tobs: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[surfsup] query: query_station_temperatures_since returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Get min/max/average temperature over measurements dated on or after
    /// `start_date` and, when given, on or before `end_date`.
    ///
    /// A single aggregate pass. No matching rows yields all-`None` stats,
    /// which is also what `start_date > end_date` produces.
    pub fn query_temperature_stats(
        &self,
        start_date: &str,
        end_date: Option<&str>,
    ) -> anyhow::Result<TemperatureStats> {
        let conn = self.conn()?;
        let stats = conn.query_row(
            "SELECT CAST(MIN(tobs) AS INTEGER), CAST(MAX(tobs) AS INTEGER), AVG(tobs)
             FROM measurement
             WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
            params![start_date, end_date],
            |row| {
                Ok(TemperatureStats {
                    min: row.get(0)?,
                    max: row.get(1)?,
                    avg: row.get(2)?,
                })
            },
        )?;
        log::info!(
            "[surfsup] query: query_temperature_stats({}, {:?}) returned {:?}",
            start_date,
            end_date,
            stats
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::TemperatureStats;
    use crate::Database;

    /// Helper to create a database with two stations and a few weeks of data
    /// around the end of the published dataset.
    fn sample_db() -> Database {
        let db = Database::new().unwrap();

        let stations_csv = "\
station,name,latitude,longitude,elevation
USC00519397,\"WAIKIKI 717.2, HI US\",21.2716,-157.8168,3.0
USC00519281,\"WAIHEE 837.5, HI US\",21.45167,-157.84889,32.9
";
        db.load_stations(stations_csv).unwrap();

        let measurements_csv = "\
station,date,prcp,tobs
USC00519397,2016-08-22,0.40,76
USC00519281,2016-08-23,1.79,77
USC00519397,2016-08-23,0.00,81
USC00519281,2017-08-18,,79
USC00519397,2017-08-22,0.00,82
USC00519281,2017-08-22,0.50,76
USC00519397,2017-08-23,0.00,81
";
        db.load_measurements(measurements_csv).unwrap();

        db
    }

    #[test]
    fn most_recent_date_is_max_date() {
        let db = sample_db();
        assert_eq!(
            db.query_most_recent_date().unwrap().as_deref(),
            Some("2017-08-23")
        );
    }

    #[test]
    fn most_recent_date_on_empty_table() {
        let db = Database::new().unwrap();
        assert_eq!(db.query_most_recent_date().unwrap(), None);
    }

    #[test]
    fn precipitation_since_filters_and_orders() {
        let db = sample_db();
        let rows = db.query_precipitation_since("2016-08-23").unwrap();
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(
            dates,
            vec![
                "2016-08-23",
                "2016-08-23",
                "2017-08-18",
                "2017-08-22",
                "2017-08-22",
                "2017-08-23"
            ]
        );
        // Ties keep insertion order.
        assert_eq!(rows[0].prcp, Some(1.79));
        assert_eq!(rows[1].prcp, Some(0.0));
        assert_eq!(rows[2].prcp, None);
    }

    #[test]
    fn precipitation_since_future_date_is_empty() {
        let db = sample_db();
        assert!(db.query_precipitation_since("2099-01-01").unwrap().is_empty());
    }

    #[test]
    fn stations_in_storage_order() {
        let db = sample_db();
        let stations = db.query_stations().unwrap();
        let codes: Vec<&str> = stations.iter().map(|s| s.station.as_str()).collect();
        assert_eq!(codes, vec!["USC00519397", "USC00519281"]);
    }

    #[test]
    fn station_temperatures_only_for_station() {
        let db = sample_db();
        let rows = db
            .query_station_temperatures_since("USC00519281", "2016-08-23")
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, "2016-08-23");
        assert_eq!(rows[0].tobs, 77);
        assert_eq!(rows[2].date, "2017-08-22");
        assert_eq!(rows[2].tobs, 76);
    }

    #[test]
    fn station_temperatures_unknown_station() {
        let db = sample_db();
        let rows = db
            .query_station_temperatures_since("NOPE", "2000-01-01")
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn temperature_stats_open_ended() {
        let db = sample_db();
        let stats = db.query_temperature_stats("2017-08-22", None).unwrap();
        assert_eq!(stats.min, Some(76));
        assert_eq!(stats.max, Some(82));
        let avg = stats.avg.unwrap();
        assert!((avg - (82.0 + 76.0 + 81.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn temperature_stats_bounded_range() {
        let db = sample_db();
        let stats = db
            .query_temperature_stats("2016-08-22", Some("2016-08-23"))
            .unwrap();
        assert_eq!(stats.min, Some(76));
        assert_eq!(stats.max, Some(81));
        assert!((stats.avg.unwrap() - 78.0).abs() < 1e-9);
    }

    #[test]
    fn temperature_stats_end_is_inclusive() {
        let db = sample_db();
        let stats = db
            .query_temperature_stats("2017-08-23", Some("2017-08-23"))
            .unwrap();
        assert_eq!(stats.min, Some(81));
        assert_eq!(stats.max, Some(81));
    }

    #[test]
    fn temperature_stats_no_match_is_all_none() {
        let db = sample_db();
        let future = db.query_temperature_stats("2099-01-01", None).unwrap();
        assert_eq!(future.min, None);
        assert_eq!(future.max, None);
        assert_eq!(future.avg, None);

        let reversed = db
            .query_temperature_stats("2017-08-23", Some("2016-08-22"))
            .unwrap();
        assert_eq!(reversed, TemperatureStats::default());
    }

    #[test]
    fn temperature_stats_bounds_are_ordered() {
        let db = sample_db();
        for start in ["2016-01-01", "2016-08-23", "2017-08-18", "2017-08-23"] {
            let stats = db.query_temperature_stats(start, None).unwrap();
            let (min, max, avg) = (stats.min.unwrap(), stats.max.unwrap(), stats.avg.unwrap());
            assert!(min as f64 <= avg && avg <= max as f64, "start {}", start);
        }
    }

    #[test]
    fn float_tobs_column_is_served_as_integer() {
        let db = Database::new().unwrap();
        {
            let conn = db.conn().unwrap();
            conn.execute_batch(
                "DROP TABLE measurement;
                 CREATE TABLE measurement (
                     id INTEGER NOT NULL, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT,
                     PRIMARY KEY (id)
                 );
                 INSERT INTO measurement (station, date, prcp, tobs)
                 VALUES ('USC00519281', '2017-08-23', 0.0, 79.0);",
            )
            .unwrap();
        }

        let rows = db
            .query_station_temperatures_since("USC00519281", "2016-08-23")
            .unwrap();
        assert_eq!(rows[0].tobs, 79);

        let stats = db.query_temperature_stats("2017-08-23", None).unwrap();
        assert_eq!(stats.min, Some(79));
        assert_eq!(stats.max, Some(79));
        assert_eq!(stats.avg, Some(79.0));
    }
}
