//! HRDB Store - SQLite persistence for the HR domain
//!
//! Provides:
//! - Connection management and environment-driven configuration
//! - Per-entity identity maps guaranteeing one in-memory instance per row
//! - A generic repository issuing one autocommitted statement per operation
//! - `HrStore`, a facade owning the connection and the three repositories

pub mod config;
pub mod db;
pub mod errors;
pub mod repo;
pub mod store;

// Re-export key types
pub use config::{DatabaseLocation, StoreConfig};
pub use errors::Result;
pub use repo::{IdentityMap, Repository, SqlRecord};
pub use store::{DepartmentFinder, EmployeeFinder, HrStore};
