//! HRDB Core - domain models and shared facilities
//!
//! This crate provides:
//! - `Department`, `Employee` and `Review` models with validate-on-assign
//!   fields and lazily resolved parent references
//! - Lookup traits the store implements for foreign-key validation
//! - The structured error facility (`ExError`, `ExErrorKind`, `HrError`)
//! - The structured logging facility and its lifecycle macros

pub mod errors;
pub mod logging_facility;
pub mod lookup;
pub mod model;
pub mod rules;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, ExResult, HrError, Result};
pub use lookup::{DepartmentLookup, EmployeeLookup};
pub use model::{shared, Department, Employee, Record, Review, Shared};
pub use rules::validation::{YearInput, MIN_REVIEW_YEAR};
