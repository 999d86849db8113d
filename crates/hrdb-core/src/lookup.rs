//! Lookup seams used for foreign-key validation
//!
//! Entities never talk to the database directly. When a foreign key is
//! assigned or a parent is lazily resolved, they ask one of these traits,
//! which the store implements on top of its repositories.

use crate::errors::ExResult;
use crate::model::{Department, Employee, Shared};

/// Resolves persisted employees by id
pub trait EmployeeLookup {
    /// Return the persisted employee with `id`, or `None` if no such row
    ///
    /// # Errors
    /// Propagates database failures from the underlying store.
    fn find_employee(&mut self, id: i64) -> ExResult<Option<Shared<Employee>>>;
}

/// Resolves persisted departments by id
pub trait DepartmentLookup {
    /// Return the persisted department with `id`, or `None` if no such row
    ///
    /// # Errors
    /// Propagates database failures from the underlying store.
    fn find_department(&mut self, id: i64) -> ExResult<Option<Shared<Department>>>;
}
