//! Command implementations for the SurfsUp CLI.
//!
//! Provides the `serve` subcommand that runs the weather query API and the
//! `import` subcommand that builds a database file from the dataset's CSVs.

use clap::Subcommand;
use std::net::SocketAddr;
use std::path::PathBuf;

pub mod import;
pub mod serve;

#[derive(Subcommand)]
pub enum Command {
    /// Serve the weather query API over an existing database
    Serve {
        /// SQLite database file (opened read-only)
        #[arg(short = 'd', long, env = "SURFSUP_DATABASE", default_value = "Resources/hawaii.sqlite")]
        database: PathBuf,

        /// Address to listen on
        #[arg(short = 'b', long, env = "SURFSUP_BIND", default_value = "127.0.0.1:5000")]
        bind: SocketAddr,

        /// Number of pooled read-only connections
        #[arg(long, env = "SURFSUP_POOL_SIZE", default_value_t = 4)]
        pool_size: usize,
    },

    /// Create or extend a database file from station and measurement CSVs
    Import {
        /// SQLite database file to write
        #[arg(short = 'd', long, env = "SURFSUP_DATABASE", default_value = "Resources/hawaii.sqlite")]
        database: PathBuf,

        /// Stations CSV (station,name,latitude,longitude,elevation)
        #[arg(short = 's', long)]
        stations: PathBuf,

        /// Measurements CSV (station,date,prcp,tobs)
        #[arg(short = 'm', long)]
        measurements: PathBuf,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve {
            database,
            bind,
            pool_size,
        } => serve::run_serve(&database, bind, pool_size).await,
        Command::Import {
            database,
            stations,
            measurements,
        } => {
            let summary = import::run_import(&database, &stations, &measurements)?;
            log::info!(
                "Import complete: {} stations, {} measurements written to {}",
                summary.stations,
                summary.measurements,
                database.display()
            );
            Ok(())
        }
    }
}
