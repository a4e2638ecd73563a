//! `import`: build a database file from the dataset's CSV exports.

use anyhow::Context;
use log::info;
use std::path::Path;
use surfsup_db::Database;

/// Row counts written by one import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub stations: usize,
    pub measurements: usize,
}

/// Create (or extend) `database` and load both CSV files into it.
///
/// Stations are upserted by code; measurements are appended, so importing
/// the same measurements file twice duplicates its rows.
pub fn run_import(
    database: &Path,
    stations_csv: &Path,
    measurements_csv: &Path,
) -> anyhow::Result<ImportSummary> {
    let stations_data = std::fs::read_to_string(stations_csv)
        .with_context(|| format!("failed to read {}", stations_csv.display()))?;
    let measurements_data = std::fs::read_to_string(measurements_csv)
        .with_context(|| format!("failed to read {}", measurements_csv.display()))?;

    if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let db = Database::create(database)?;

    info!("Importing stations from {}", stations_csv.display());
    let stations = db.load_stations(&stations_data)?;
    info!("Importing measurements from {}", measurements_csv.display());
    let measurements = db.load_measurements(&measurements_data)?;

    Ok(ImportSummary {
        stations,
        measurements,
    })
}
