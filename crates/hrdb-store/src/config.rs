//! Store configuration
//!
//! A `StoreConfig` names the database to open and the pragmas to apply.
//! It can be built in code or read from `HRDB_*` environment variables.

use std::path::{Path, PathBuf};

use crate::errors::{config_error, Result};

/// Environment variable holding the database path, or `:memory:`
pub const ENV_DATABASE: &str = "HRDB_DATABASE";
/// Environment variable toggling WAL journaling for file databases
pub const ENV_WAL: &str = "HRDB_WAL";
/// Environment variable toggling `PRAGMA foreign_keys`
pub const ENV_FOREIGN_KEYS: &str = "HRDB_FOREIGN_KEYS";

/// Database file used when `HRDB_DATABASE` is not set
pub const DEFAULT_DATABASE_PATH: &str = "company.db";

const MEMORY_MARKER: &str = ":memory:";

/// Where the SQLite database lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Memory,
    File(PathBuf),
}

impl DatabaseLocation {
    /// Parse a location string; `:memory:` selects an in-memory database
    pub fn parse(value: &str) -> Self {
        if value == MEMORY_MARKER {
            DatabaseLocation::Memory
        } else {
            DatabaseLocation::File(PathBuf::from(value))
        }
    }
}

/// Connection settings for [`crate::db::open`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: DatabaseLocation,
    pub foreign_keys: bool,
    /// Only honored for file databases
    pub wal: bool,
}

impl StoreConfig {
    /// In-memory database, foreign keys on
    pub fn in_memory() -> Self {
        Self {
            location: DatabaseLocation::Memory,
            foreign_keys: true,
            wal: false,
        }
    }

    /// File database at `path`, foreign keys on, WAL journaling
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            location: DatabaseLocation::File(path.as_ref().to_path_buf()),
            foreign_keys: true,
            wal: true,
        }
    }

    pub fn with_wal(mut self, wal: bool) -> Self {
        self.wal = wal;
        self
    }

    pub fn with_foreign_keys(mut self, foreign_keys: bool) -> Self {
        self.foreign_keys = foreign_keys;
        self
    }

    /// Read configuration from the process environment
    ///
    /// # Errors
    /// `InvalidConfig` when a boolean variable holds an unrecognized value.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable source
    ///
    /// # Errors
    /// `InvalidConfig` when a boolean variable holds an unrecognized value.
    pub fn from_vars<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let location = get(ENV_DATABASE)
            .filter(|value| !value.trim().is_empty())
            .map(|value| DatabaseLocation::parse(value.trim()))
            .unwrap_or_else(|| DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH)));

        let mut config = match location {
            DatabaseLocation::Memory => Self::in_memory(),
            DatabaseLocation::File(path) => Self::file(path),
        };

        if let Some(value) = get(ENV_WAL) {
            config.wal = parse_bool(ENV_WAL, &value)?;
        }
        if let Some(value) = get(ENV_FOREIGN_KEYS) {
            config.foreign_keys = parse_bool(ENV_FOREIGN_KEYS, &value)?;
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(config_error(
            key,
            &format!("expected a boolean, got '{}'", other),
        )),
    }
}
