//! Connection bootstrap.
//!
//! Every connection returned from here has foreign keys enabled, a busy
//! timeout set and all migrations applied.

use std::path::Path;
use std::time::{Duration, Instant};

use rusqlite::Connection;
use tracing::{error, info};

use super::migrations::apply_migrations;
use super::DbResult;

/// Database path that selects a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the configured database, treating [`IN_MEMORY_PATH`] specially.
pub fn open_database(path: &str) -> DbResult<Connection> {
    if path == IN_MEMORY_PATH {
        open_db_in_memory()
    } else {
        open_db(path)
    }
}

/// Open a SQLite database file and apply all pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    bootstrap("file", || Connection::open(path))
}

/// Open an in-memory SQLite database and apply all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    bootstrap("memory", Connection::open_in_memory)
}

fn bootstrap(
    mode: &'static str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();

    let mut conn = open().inspect_err(|e| {
        error!(mode, error = %e, "Failed to open database");
    })?;

    configure(&mut conn).inspect_err(|e| {
        error!(mode, error = %e, "Failed to bootstrap database");
    })?;

    info!(
        mode,
        duration_ms = started_at.elapsed().as_millis() as u64,
        "Database ready"
    );
    Ok(conn)
}

fn configure(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}
