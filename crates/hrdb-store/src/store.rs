//! `HrStore` facade
//!
//! Owns the connection and one repository per entity. Fields are public so
//! callers can borrow the connection and a repository at the same time:
//!
//! ```
//! use hrdb_store::HrStore;
//!
//! let mut store = HrStore::open_in_memory().unwrap();
//! store.create_tables().unwrap();
//! let sales = store.departments.create(&store.conn, "Sales", "NY").unwrap();
//! assert_eq!(sales.borrow().id(), Some(1));
//! ```

use hrdb_core::errors::ExResult;
use hrdb_core::lookup::{DepartmentLookup, EmployeeLookup};
use hrdb_core::model::{Department, Employee, Review, Shared};
use rusqlite::Connection;

use crate::config::StoreConfig;
use crate::db;
use crate::errors::Result;
use crate::repo::Repository;

/// Connection plus the three entity repositories
pub struct HrStore {
    pub conn: Connection,
    pub departments: Repository<Department>,
    pub employees: Repository<Employee>,
    pub reviews: Repository<Review>,
}

impl HrStore {
    /// Open the database described by `config`
    ///
    /// # Errors
    /// See [`db::open`].
    pub fn open(config: &StoreConfig) -> Result<Self> {
        Ok(Self::from_connection(db::open(config)?))
    }

    /// # Errors
    /// `Persistence` if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_connection(db::open_in_memory()?))
    }

    /// Wrap an already configured connection with empty identity maps
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            departments: Repository::new(),
            employees: Repository::new(),
            reviews: Repository::new(),
        }
    }

    /// Create all tables, parents first
    ///
    /// # Errors
    /// `Persistence` on driver failure.
    pub fn create_tables(&self) -> Result<()> {
        Repository::<Department>::create_table(&self.conn)?;
        Repository::<Employee>::create_table(&self.conn)?;
        Repository::<Review>::create_table(&self.conn)?;
        Ok(())
    }

    /// Drop all tables, children first
    ///
    /// # Errors
    /// `Persistence` on driver failure.
    pub fn drop_tables(&self) -> Result<()> {
        Repository::<Review>::drop_table(&self.conn)?;
        Repository::<Employee>::drop_table(&self.conn)?;
        Repository::<Department>::drop_table(&self.conn)?;
        Ok(())
    }

    /// Drop and recreate every table and empty the identity maps
    ///
    /// # Errors
    /// `Persistence` on driver failure.
    pub fn reset(&mut self) -> Result<()> {
        self.drop_tables()?;
        self.create_tables()?;
        self.clear_caches();
        Ok(())
    }

    pub fn clear_caches(&mut self) {
        self.departments.clear_cache();
        self.employees.clear_cache();
        self.reviews.clear_cache();
    }

    /// Employee lookup for [`Review::set_employee_id`] and [`Review::employee`]
    pub fn employee_finder(&mut self) -> EmployeeFinder<'_> {
        EmployeeFinder::new(&self.conn, &mut self.employees)
    }

    /// Department lookup for [`Employee::set_department_id`] and
    /// [`Employee::department`]
    pub fn department_finder(&mut self) -> DepartmentFinder<'_> {
        DepartmentFinder::new(&self.conn, &mut self.departments)
    }

    /// Reviews of `employee` in creation order; empty if it was never saved
    ///
    /// # Errors
    /// Driver and validation errors propagate.
    pub fn employee_reviews(&mut self, employee: &Shared<Employee>) -> Result<Vec<Shared<Review>>> {
        self.reviews.for_employee_record(&self.conn, employee)
    }

    /// Employees of `department` in id order; empty if it was never saved
    ///
    /// # Errors
    /// Driver and validation errors propagate.
    pub fn department_employees(
        &mut self,
        department: &Shared<Department>,
    ) -> Result<Vec<Shared<Employee>>> {
        self.employees
            .for_department_record(&self.conn, department)
    }

    /// The employee a review points at, resolved through the identity map
    ///
    /// # Errors
    /// Driver and validation errors propagate.
    pub fn review_employee(&mut self, review: &Shared<Review>) -> Result<Option<Shared<Employee>>> {
        let mut finder = self.employee_finder();
        review.borrow_mut().employee(&mut finder)
    }

    /// The department an employee belongs to, resolved through the identity map
    ///
    /// # Errors
    /// Driver and validation errors propagate.
    pub fn employee_department(
        &mut self,
        employee: &Shared<Employee>,
    ) -> Result<Option<Shared<Department>>> {
        let mut finder = self.department_finder();
        employee.borrow_mut().department(&mut finder)
    }
}

/// [`EmployeeLookup`] backed by the employee repository
pub struct EmployeeFinder<'a> {
    conn: &'a Connection,
    employees: &'a mut Repository<Employee>,
}

impl<'a> EmployeeFinder<'a> {
    pub fn new(conn: &'a Connection, employees: &'a mut Repository<Employee>) -> Self {
        Self { conn, employees }
    }
}

impl EmployeeLookup for EmployeeFinder<'_> {
    fn find_employee(&mut self, id: i64) -> ExResult<Option<Shared<Employee>>> {
        self.employees.find_by_id(self.conn, id)
    }
}

/// [`DepartmentLookup`] backed by the department repository
pub struct DepartmentFinder<'a> {
    conn: &'a Connection,
    departments: &'a mut Repository<Department>,
}

impl<'a> DepartmentFinder<'a> {
    pub fn new(conn: &'a Connection, departments: &'a mut Repository<Department>) -> Self {
        Self { conn, departments }
    }
}

impl DepartmentLookup for DepartmentFinder<'_> {
    fn find_department(&mut self, id: i64) -> ExResult<Option<Shared<Department>>> {
        self.departments.find_by_id(self.conn, id)
    }
}
