//! Repository layer mapping HR entities to SQLite tables
//!
//! ## Logging Ownership
//!
//! Mutating repository operations (`create_table`, `drop_table`, `save`,
//! `update`, `delete`) own lifecycle logging through `log_op_start!`,
//! `log_op_end!` and `log_op_error!`. Reads and identity-map hits use
//! `tracing::debug!()` only.

pub mod department;
pub mod employee;
pub mod identity_map;
pub mod record;
pub mod repository;
pub mod review;

pub use department::DepartmentRow;
pub use employee::EmployeeRow;
pub use identity_map::IdentityMap;
pub use record::SqlRecord;
pub use repository::Repository;
pub use review::ReviewRow;
