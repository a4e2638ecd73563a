//! Pooled SQLite access layer for the Hawaii weather observation dataset.
//!
//! This crate owns everything that touches the relational store: the schema,
//! a small fixed-size connection pool, CSV loaders used to build a database
//! file, and typed query methods returning serializable structs.
//!
//! # Architecture
//!
//! - `Arc<[Mutex<Connection>]>` pool so one [`Database`] handle can be cloned
//!   into every request handler and shared across worker threads
//! - Served databases are opened read-only; only [`Database::new`] and
//!   [`Database::create`] yield writable handles (for tests and import)
//! - Query methods are synchronous; async callers run them on a blocking pool
//!
//! # Usage
//!
//! ```rust
//! use surfsup_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_stations("station,name,latitude,longitude,elevation\nUSC00519281,\"WAIHEE 837.5, HI US\",21.45167,-157.84889,32.9\n").unwrap();
//! db.load_measurements("station,date,prcp,tobs\nUSC00519281,2017-08-23,0.0,79\n").unwrap();
//!
//! let stations = db.query_stations().unwrap();
//! let latest = db.query_most_recent_date().unwrap();
//! assert_eq!(stations.len(), 1);
//! assert_eq!(latest.as_deref(), Some("2017-08-23"));
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//! - `station` - Observation sites
//! - `measurement` - Daily precipitation and temperature readings

pub mod schema;
mod loader;
mod queries;
pub mod models;

use anyhow::Context;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Pool of SQLite connections over the weather observation dataset.
///
/// Cheaply cloneable (via `Arc`); every clone shares the same slots. A
/// query borrows one slot for its duration and releases it when the guard
/// drops.
///
/// # Example
///
/// ```rust
/// use surfsup_db::Database;
///
/// let db = Database::new().unwrap();
/// db.load_stations("station,name,latitude,longitude,elevation\nUSC00519397,\"WAIKIKI 717.2, HI US\",21.2716,-157.8168,3.0\n").unwrap();
/// let stations = db.query_stations().unwrap();
/// assert_eq!(stations.len(), 1);
/// ```
#[derive(Clone)]
pub struct Database {
    slots: Arc<[Mutex<Connection>]>,
    next: Arc<AtomicUsize>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data. The pool holds a single slot, since
    /// every in-memory connection would otherwise see its own database.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self::from_connections(vec![conn]))
    }

    /// Create (or reopen) a writable database file and apply the schema.
    pub fn create(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("failed to create database at {}", path.display()))?;
        conn.execute_batch(schema::create_schema())?;
        log::info!("[surfsup] db: opened {} for writing", path.display());
        Ok(Self::from_connections(vec![conn]))
    }

    /// Open an existing database file read-only with `pool_size` connections.
    ///
    /// A `pool_size` of zero is treated as one. Fails if the file cannot be
    /// opened or lacks the `station` / `measurement` tables.
    pub fn open(path: impl AsRef<Path>, pool_size: usize) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let size = pool_size.max(1);
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_NO_MUTEX
            | OpenFlags::SQLITE_OPEN_URI;

        let mut conns = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(path, flags)
                .with_context(|| format!("failed to open database at {}", path.display()))?;
            conns.push(conn);
        }
        check_tables(&conns[0])
            .with_context(|| format!("{} is not a weather dataset", path.display()))?;

        log::info!(
            "[surfsup] db: opened {} read-only with {} connections",
            path.display(),
            size
        );
        Ok(Self::from_connections(conns))
    }

    /// Number of connections in the pool.
    pub fn pool_size(&self) -> usize {
        self.slots.len()
    }

    fn from_connections(conns: Vec<Connection>) -> Self {
        let slots: Vec<Mutex<Connection>> = conns.into_iter().map(Mutex::new).collect();
        Self {
            slots: Arc::from(slots),
            next: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Borrow a connection: the first idle slot starting from a round-robin
    /// cursor, or wait on the cursor slot when all are busy.
    pub(crate) fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        let len = self.slots.len();
        let start = self.next.fetch_add(1, Ordering::Relaxed) % len;
        for offset in 0..len {
            if let Ok(guard) = self.slots[(start + offset) % len].try_lock() {
                return Ok(guard);
            }
        }
        self.slots[start]
            .lock()
            .map_err(|_| anyhow::anyhow!("connection slot {} is poisoned", start))
    }
}

fn check_tables(conn: &Connection) -> anyhow::Result<()> {
    for table in schema::REQUIRED_TABLES {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
            [table],
            |row| row.get(0),
        )?;
        if !exists {
            anyhow::bail!("missing `{}` table", table);
        }
    }
    Ok(())
}
