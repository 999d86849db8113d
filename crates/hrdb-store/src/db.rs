//! Database connection management
//!
//! Opens SQLite connections according to a [`StoreConfig`]. Every statement
//! issued through a connection opened here runs in autocommit mode.

use crate::config::{DatabaseLocation, StoreConfig};
use crate::errors::{from_rusqlite, io_error, Result};
use rusqlite::Connection;

/// Open and configure a connection
///
/// Missing parent directories of a file database are created.
///
/// # Errors
/// `Io` when the parent directory cannot be created, `Persistence` when
/// SQLite refuses to open or configure the database.
pub fn open(config: &StoreConfig) -> Result<Connection> {
    let conn = match &config.location {
        DatabaseLocation::Memory => Connection::open_in_memory().map_err(from_rusqlite)?,
        DatabaseLocation::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
            }
            Connection::open(path).map_err(from_rusqlite)?
        }
    };

    configure(&conn, config)?;
    tracing::debug!(location = ?config.location, "opened database");
    Ok(conn)
}

/// Open an in-memory SQLite database (for testing)
///
/// # Errors
/// `Persistence` if SQLite cannot allocate the database.
pub fn open_in_memory() -> Result<Connection> {
    open(&StoreConfig::in_memory())
}

/// Apply connection pragmas
///
/// # Errors
/// `Persistence` if a pragma fails.
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    let foreign_keys = if config.foreign_keys { "ON" } else { "OFF" };
    conn.execute_batch(&format!("PRAGMA foreign_keys = {};", foreign_keys))
        .map_err(from_rusqlite)?;

    if config.wal && matches!(config.location, DatabaseLocation::File(_)) {
        conn.execute_batch("PRAGMA journal_mode = WAL;")
            .map_err(from_rusqlite)?;
    }

    Ok(())
}
