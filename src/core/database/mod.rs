//! SQLite storage bootstrap.
//!
//! Opens the todo database, configures the connection and applies schema
//! migrations before anything reads or writes application data. The schema
//! version is tracked through `PRAGMA user_version`.

pub mod migrations;
mod open;

use thiserror::Error;

pub use open::{open_database, open_db, open_db_in_memory, IN_MEMORY_PATH};

/// Result type for database bootstrap operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors raised while opening or migrating the database.
#[derive(Debug, Error)]
pub enum DbError {
    /// Error reported by SQLite.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The database was written by a newer build.
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}
