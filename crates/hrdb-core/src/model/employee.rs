use serde::Serialize;

use super::{Department, Record, Shared};
use crate::errors::{ExResult, HrError, Result};
use crate::lookup::DepartmentLookup;
use crate::rules::validation::require_non_empty;

/// An employee, belonging to one department
#[derive(Debug, Serialize)]
pub struct Employee {
    id: Option<i64>,
    name: String,
    job_title: String,
    department_id: Option<i64>,
    #[serde(skip)]
    department: Option<Shared<Department>>,
}

impl Employee {
    /// Create an unpersisted employee
    ///
    /// `department_id` is not checked against the database here; use
    /// [`Employee::set_department_id`] for a checked assignment.
    ///
    /// # Errors
    /// `EmptyField` when `name` or `job_title` is empty.
    pub fn new(
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: i64,
    ) -> Result<Self> {
        Ok(Self {
            id: None,
            name: require_non_empty(Self::ENTITY, "name", name)?,
            job_title: require_non_empty(Self::ENTITY, "job_title", job_title)?,
            department_id: Some(department_id),
            department: None,
        })
    }

    /// Attach a known database id (used when materializing rows)
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Build from a stored row whose department column may be NULL
    ///
    /// # Errors
    /// `EmptyField` when a stored text column is empty.
    pub fn from_stored(
        id: i64,
        name: String,
        job_title: String,
        department_id: Option<i64>,
    ) -> Result<Self> {
        Ok(Self {
            id: Some(id),
            name: require_non_empty(Self::ENTITY, "name", name)?,
            job_title: require_non_empty(Self::ENTITY, "job_title", job_title)?,
            department_id,
            department: None,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn department_id(&self) -> Option<i64> {
        self.department_id
    }

    /// # Errors
    /// `EmptyField` when `name` is empty; the current value is kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = require_non_empty(Self::ENTITY, "name", name)?;
        Ok(())
    }

    /// # Errors
    /// `EmptyField` when `job_title` is empty; the current value is kept.
    pub fn set_job_title(&mut self, job_title: impl Into<String>) -> Result<()> {
        self.job_title = require_non_empty(Self::ENTITY, "job_title", job_title)?;
        Ok(())
    }

    /// Point this employee at another persisted department
    ///
    /// Drops the cached department so the next [`Employee::department`] call
    /// re-resolves it.
    ///
    /// # Errors
    /// `InvalidInput` if no persisted department has `department_id`;
    /// database errors from the lookup are propagated.
    pub fn set_department_id(
        &mut self,
        department_id: i64,
        lookup: &mut impl DepartmentLookup,
    ) -> ExResult<()> {
        if lookup.find_department(department_id)?.is_none() {
            return Err(HrError::UnknownDepartment { department_id }.into());
        }
        self.department_id = Some(department_id);
        self.department = None;
        Ok(())
    }

    /// The department this employee belongs to, resolved on first access
    ///
    /// # Errors
    /// Database errors from the lookup are propagated.
    pub fn department(
        &mut self,
        lookup: &mut impl DepartmentLookup,
    ) -> ExResult<Option<Shared<Department>>> {
        if self.department.is_none() {
            if let Some(department_id) = self.department_id {
                self.department = lookup.find_department(department_id)?;
            }
        }
        Ok(self.department.clone())
    }

    /// Assign a persisted department by reference
    ///
    /// # Errors
    /// `DepartmentNotPersisted` when the department has no id.
    pub fn set_department(&mut self, department: &Shared<Department>) -> Result<()> {
        let department_id = department
            .borrow()
            .id()
            .ok_or(HrError::DepartmentNotPersisted)?;
        self.department_id = Some(department_id);
        self.department = Some(department.clone());
        Ok(())
    }

    pub fn invalidate_department(&mut self) {
        self.department = None;
    }
}

impl Record for Employee {
    const ENTITY: &'static str = "Employee";

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
        if self.department_id != fresh.department_id {
            self.department = None;
        }
        self.name = fresh.name;
        self.job_title = fresh.job_title;
        self.department_id = fresh.department_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::shared;
    use std::collections::HashMap;
    use std::rc::Rc;

    struct FakeDepartments {
        rows: HashMap<i64, Shared<Department>>,
        calls: usize,
    }

    impl FakeDepartments {
        fn with(ids: &[i64]) -> Self {
            let rows = ids
                .iter()
                .map(|id| {
                    let dept = Department::new(format!("Dept {}", id), "NY")
                        .unwrap()
                        .with_id(*id);
                    (*id, shared(dept))
                })
                .collect();
            Self { rows, calls: 0 }
        }
    }

    impl DepartmentLookup for FakeDepartments {
        fn find_department(&mut self, id: i64) -> ExResult<Option<Shared<Department>>> {
            self.calls += 1;
            Ok(self.rows.get(&id).cloned())
        }
    }

    #[test]
    fn test_new_employee_does_not_check_department() {
        let emp = Employee::new("John Doe", "Salesperson", 999).unwrap();
        assert_eq!(emp.department_id(), Some(999));
        assert_eq!(emp.id(), None);
    }

    #[test]
    fn test_set_department_id_requires_persisted_department() {
        let mut lookup = FakeDepartments::with(&[1, 2]);
        let mut emp = Employee::new("John Doe", "Salesperson", 1).unwrap();

        emp.set_department_id(2, &mut lookup).unwrap();
        assert_eq!(emp.department_id(), Some(2));

        let err = emp.set_department_id(3, &mut lookup).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(emp.department_id(), Some(2));
    }

    #[test]
    fn test_department_is_cached_until_invalidated() {
        let mut lookup = FakeDepartments::with(&[1, 2]);
        let mut emp = Employee::new("John Doe", "Salesperson", 1).unwrap();

        let first = emp.department(&mut lookup).unwrap().unwrap();
        let second = emp.department(&mut lookup).unwrap().unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(lookup.calls, 1);

        emp.set_department_id(2, &mut lookup).unwrap();
        let third = emp.department(&mut lookup).unwrap().unwrap();
        assert_eq!(third.borrow().id(), Some(2));
    }

    #[test]
    fn test_invalidate_department_forces_new_lookup() {
        let mut lookup = FakeDepartments::with(&[1]);
        let mut emp = Employee::new("John Doe", "Salesperson", 1).unwrap();

        emp.department(&mut lookup).unwrap().unwrap();
        assert_eq!(lookup.calls, 1);

        emp.invalidate_department();
        let again = emp.department(&mut lookup).unwrap().unwrap();
        assert_eq!(lookup.calls, 2);
        assert_eq!(again.borrow().id(), Some(1));
        assert_eq!(emp.department_id(), Some(1));
    }

    #[test]
    fn test_set_department_rejects_unsaved() {
        let unsaved = shared(Department::new("Ops", "LA").unwrap());
        let mut emp = Employee::new("Jane", "Manager", 1).unwrap();
        assert_eq!(
            emp.set_department(&unsaved).unwrap_err(),
            HrError::DepartmentNotPersisted
        );
        assert_eq!(emp.department_id(), Some(1));
    }

    #[test]
    fn test_refresh_drops_stale_department() {
        let mut lookup = FakeDepartments::with(&[1, 2]);
        let mut emp = Employee::new("John Doe", "Salesperson", 1)
            .unwrap()
            .with_id(10);
        emp.department(&mut lookup).unwrap();

        let fresh = Employee::from_stored(10, "John Doe".into(), "Lead".into(), Some(2)).unwrap();
        emp.refresh_from(fresh);

        assert_eq!(emp.job_title(), "Lead");
        let dept = emp.department(&mut lookup).unwrap().unwrap();
        assert_eq!(dept.borrow().id(), Some(2));
    }
}
