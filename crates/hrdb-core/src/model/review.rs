use serde::Serialize;

use super::{Employee, Record, Shared};
use crate::errors::{ExResult, HrError, Result};
use crate::lookup::EmployeeLookup;
use crate::rules::validation::{require_non_empty, validate_year, YearInput};

/// A yearly performance review of one employee
///
/// `year` and `summary` are validated eagerly by the constructor and the
/// setters. `employee_id` is only checked against the database when assigned
/// through [`Review::set_employee_id`].
#[derive(Debug, Serialize)]
pub struct Review {
    id: Option<i64>,
    year: i64,
    summary: String,
    employee_id: Option<i64>,
    #[serde(skip)]
    employee: Option<Shared<Employee>>,
}

impl Review {
    /// Create an unpersisted review
    ///
    /// # Errors
    /// `InvalidYear` or `EmptyField` when `year` or `summary` is invalid.
    pub fn new(
        year: impl Into<YearInput>,
        summary: impl Into<String>,
        employee_id: i64,
    ) -> Result<Self> {
        Ok(Self {
            id: None,
            year: validate_year(year)?,
            summary: require_non_empty(Self::ENTITY, "summary", summary)?,
            employee_id: Some(employee_id),
            employee: None,
        })
    }

    /// Attach a known database id (used when materializing rows)
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Build from a stored row whose employee column may be NULL
    ///
    /// # Errors
    /// `InvalidYear` or `EmptyField` when the stored values are invalid.
    pub fn from_stored(
        id: i64,
        year: i64,
        summary: String,
        employee_id: Option<i64>,
    ) -> Result<Self> {
        Ok(Self {
            id: Some(id),
            year: validate_year(year)?,
            summary: require_non_empty(Self::ENTITY, "summary", summary)?,
            employee_id,
            employee: None,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> Option<i64> {
        self.employee_id
    }

    /// Set the review year from an integer or numeric text
    ///
    /// # Errors
    /// `InvalidYear` when the value is not an integer >= 2000; the current
    /// year is kept.
    pub fn set_year(&mut self, year: impl Into<YearInput>) -> Result<()> {
        self.year = validate_year(year)?;
        Ok(())
    }

    /// # Errors
    /// `EmptyField` when `summary` is empty; the current value is kept.
    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<()> {
        self.summary = require_non_empty(Self::ENTITY, "summary", summary)?;
        Ok(())
    }

    /// Point this review at another persisted employee
    ///
    /// Drops the cached employee so the next [`Review::employee`] call
    /// re-resolves it.
    ///
    /// # Errors
    /// `InvalidInput` if no persisted employee has `employee_id`; database
    /// errors from the lookup are propagated.
    pub fn set_employee_id(
        &mut self,
        employee_id: i64,
        lookup: &mut impl EmployeeLookup,
    ) -> ExResult<()> {
        if lookup.find_employee(employee_id)?.is_none() {
            return Err(HrError::UnknownEmployee { employee_id }.into());
        }
        self.employee_id = Some(employee_id);
        self.employee = None;
        Ok(())
    }

    /// The reviewed employee, resolved on first access and cached
    ///
    /// Returns `None` when `employee_id` is unset or no such row exists.
    ///
    /// # Errors
    /// Database errors from the lookup are propagated.
    pub fn employee(
        &mut self,
        lookup: &mut impl EmployeeLookup,
    ) -> ExResult<Option<Shared<Employee>>> {
        if self.employee.is_none() {
            if let Some(employee_id) = self.employee_id {
                self.employee = lookup.find_employee(employee_id)?;
            }
        }
        Ok(self.employee.clone())
    }

    /// Assign a persisted employee by reference
    ///
    /// Sets both the cached reference and `employee_id`.
    ///
    /// # Errors
    /// `EmployeeNotPersisted` when the employee has no id.
    pub fn set_employee(&mut self, employee: &Shared<Employee>) -> Result<()> {
        let employee_id = employee
            .borrow()
            .id()
            .ok_or(HrError::EmployeeNotPersisted)?;
        self.employee_id = Some(employee_id);
        self.employee = Some(employee.clone());
        Ok(())
    }

    pub fn invalidate_employee(&mut self) {
        self.employee = None;
    }
}

impl Record for Review {
    const ENTITY: &'static str = "Review";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn mark_persisted(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn mark_unpersisted(&mut self) {
        self.id = None;
    }

    fn refresh_from(&mut self, fresh: Self) {
        if self.employee_id != fresh.employee_id {
            self.employee = None;
        }
        self.year = fresh.year;
        self.summary = fresh.summary;
        self.employee_id = fresh.employee_id;
    }
}
