//! Route handlers.
//!
//! Every handler moves its queries onto tokio's blocking pool, since the
//! SQLite calls in `surfsup-db` are synchronous.

use crate::error::{ApiError, Result};
use axum::extract::{Path, State};
use axum::http::Uri;
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;
use surfsup_db::models::{DateTemperature, StationInfo, TemperatureStats};
use surfsup_db::Database;
use surfsup_utils::dates;

/// Station reported by `/api/v1.0/tobs`.
///
/// Taken to be the most active station of the published dataset; it is
/// not recomputed from the data at request time.
pub const MOST_ACTIVE_STATION: &str = "USC00519281";

/// Body of `GET /`.
pub const WELCOME: &str = "\
Available Routes:
/api/v1.0/precipitation
/api/v1.0/stations
/api/v1.0/tobs
/api/v1.0/<start>
/api/v1.0/<start>/<end>
";

/// Aggregate temperature response for the start and start/end routes.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemperatureSummary {
    #[serde(rename = "Start Date")]
    pub start_date: String,
    #[serde(rename = "End Date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(rename = "Min Temperature")]
    pub min: Option<i64>,
    #[serde(rename = "Max Temperature")]
    pub max: Option<i64>,
    #[serde(rename = "Avg Temperature")]
    pub avg: Option<f64>,
}

impl TemperatureSummary {
    fn new(start_date: String, end_date: Option<String>, stats: TemperatureStats) -> Self {
        Self {
            start_date,
            end_date,
            min: stats.min,
            max: stats.max,
            avg: stats.avg,
        }
    }
}

async fn blocking<T, F>(db: Database, f: F) -> Result<T>
where
    F: FnOnce(&Database) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&db)).await?
}

/// Start of the trailing one-year window ending at the latest measurement.
fn window_start(db: &Database) -> Result<String> {
    let latest = db.query_most_recent_date()?.ok_or(ApiError::NoData)?;
    Ok(dates::trailing_year_start(&latest)?)
}

pub async fn welcome() -> &'static str {
    WELCOME
}

/// Last year of precipitation keyed by date.
///
/// Several stations report on the same date; only the last row for each
/// date survives.
pub async fn precipitation(
    State(db): State<Database>,
) -> Result<Json<BTreeMap<String, Option<f64>>>> {
    let rows = blocking(db, |db| {
        let start = window_start(db)?;
        Ok(db.query_precipitation_since(&start)?)
    })
    .await?;

    let mut by_date = BTreeMap::new();
    for row in rows {
        by_date.insert(row.date, row.prcp);
    }
    log::debug!("[surfsup] api: precipitation -> {} dates", by_date.len());
    Ok(Json(by_date))
}

pub async fn stations(State(db): State<Database>) -> Result<Json<Vec<StationInfo>>> {
    let stations = blocking(db, |db| Ok(db.query_stations()?)).await?;
    log::debug!("[surfsup] api: stations -> {} stations", stations.len());
    Ok(Json(stations))
}

/// Last year of temperature observations at [`MOST_ACTIVE_STATION`].
pub async fn tobs(State(db): State<Database>) -> Result<Json<Vec<DateTemperature>>> {
    let rows = blocking(db, |db| {
        let start = window_start(db)?;
        Ok(db.query_station_temperatures_since(MOST_ACTIVE_STATION, &start)?)
    })
    .await?;
    log::debug!("[surfsup] api: tobs -> {} observations", rows.len());
    Ok(Json(rows))
}

/// Temperature stats from `start` to the end of the data. `start` is passed
/// through as-is; anything that is not a date just matches nothing.
pub async fn temperature_from(
    State(db): State<Database>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureSummary>> {
    let query_start = start.clone();
    let stats = blocking(db, move |db| {
        Ok(db.query_temperature_stats(&query_start, None)?)
    })
    .await?;
    Ok(Json(TemperatureSummary::new(start, None, stats)))
}

/// Temperature stats for `start..=end`. Reversed bounds yield nulls.
pub async fn temperature_range(
    State(db): State<Database>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureSummary>> {
    let (query_start, query_end) = (start.clone(), end.clone());
    let stats = blocking(db, move |db| {
        Ok(db.query_temperature_stats(&query_start, Some(&query_end))?)
    })
    .await?;
    Ok(Json(TemperatureSummary::new(start, Some(end), stats)))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
