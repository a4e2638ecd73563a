//! Read-only JSON HTTP API over the Hawaii weather observation dataset.
//!
//! # Routes
//!
//! | Path | Body |
//! |---|---|
//! | `/` | plain text route listing |
//! | `/api/v1.0/precipitation` | `{date: prcp}` for the last year of data |
//! | `/api/v1.0/stations` | `[{station, name}]` |
//! | `/api/v1.0/tobs` | `[{date, tobs}]` for the last year at the most active station |
//! | `/api/v1.0/{start}` | min/max/avg temperature from `start` |
//! | `/api/v1.0/{start}/{end}` | min/max/avg temperature over `start..=end` |
//!
//! The [`surfsup_db::Database`] pool is injected as router state; handlers
//! hold no other shared state.

pub mod error;
pub mod handlers;

use axum::routing::get;
use axum::Router;
use surfsup_db::Database;

pub use error::ApiError;

/// Build the application router over `db`.
pub fn router(db: Database) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/api/v1.0/precipitation", get(handlers::precipitation))
        .route("/api/v1.0/stations", get(handlers::stations))
        .route("/api/v1.0/tobs", get(handlers::tobs))
        .route("/api/v1.0/{start}", get(handlers::temperature_from))
        .route("/api/v1.0/{start}/{end}", get(handlers::temperature_range))
        .fallback(handlers::not_found)
        .with_state(db)
}
