//! Query result model structs.
//!
//! All structs derive `Serialize`; the HTTP layer either returns them
//! directly as JSON or reshapes them first.

use serde::Serialize;

/// Station identity for the station listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationInfo {
    /// Station code (e.g. "USC00519281").
    pub station: String,
    /// Human-readable station name.
    pub name: String,
}

/// One precipitation reading.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatePrecipitation {
    /// ISO date (YYYY-MM-DD).
    pub date: String,
    /// Precipitation, `None` where the reading is missing.
    pub prcp: Option<f64>,
}

/// One temperature observation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateTemperature {
    pub date: String,
    pub tobs: i64,
}

/// Min/max/average of `tobs` over a set of measurements.
///
/// All three are `None` when no measurement matched.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct TemperatureStats {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub avg: Option<f64>,
}
