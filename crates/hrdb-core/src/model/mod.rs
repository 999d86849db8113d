//! Domain models for the HR schema
//!
//! Entities validate every field on construction and on each `set_*` call, so
//! an instance is never observed in an invalid state. Persistence state (the
//! database id) is managed by the store through the [`Record`] trait.

use std::cell::RefCell;
use std::rc::Rc;

pub mod department;
pub mod employee;
pub mod review;

pub use department::Department;
pub use employee::Employee;
pub use review::Review;

/// Shared handle to the single in-memory instance of a persisted row
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap a value in a [`Shared`] handle
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Persistence hooks implemented by every entity
///
/// The store is the only caller of the `mark_*` and `refresh_from` methods;
/// application code reads `id()` and mutates fields through validating
/// setters.
pub trait Record {
    /// Entity name used in errors and logs (e.g. "Review")
    const ENTITY: &'static str;

    /// Database id, `None` until persisted
    fn id(&self) -> Option<i64>;

    /// Record the id assigned by the database on insert
    fn mark_persisted(&mut self, id: i64);

    /// Forget the id after the row was deleted
    fn mark_unpersisted(&mut self);

    /// Overwrite field values in place with those of a freshly loaded row
    ///
    /// Cached parent references are dropped when the foreign key changes.
    fn refresh_from(&mut self, fresh: Self)
    where
        Self: Sized;

    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
