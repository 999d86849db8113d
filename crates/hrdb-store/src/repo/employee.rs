//! `employees` table mapping

use hrdb_core::model::{Department, Employee, Shared};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};

use super::record::SqlRecord;
use super::repository::Repository;
use crate::errors::Result;

/// Raw `employees` row: `(id, name, job_title, department_id)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub id: i64,
    pub name: String,
    pub job_title: String,
    pub department_id: Option<i64>,
}

impl SqlRecord for Employee {
    type Row = EmployeeRow;

    const TABLE: &'static str = "employees";

    const CREATE_TABLE_SQL: &'static str = "
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY,
            name TEXT,
            job_title TEXT,
            department_id INTEGER
        )";

    const COLUMNS: &'static [&'static str] = &["name", "job_title", "department_id"];

    fn read_row(row: &Row<'_>) -> rusqlite::Result<EmployeeRow> {
        Ok(EmployeeRow {
            id: row.get(0)?,
            name: row.get(1)?,
            job_title: row.get(2)?,
            department_id: row.get(3)?,
        })
    }

    fn row_id(row: &EmployeeRow) -> i64 {
        row.id
    }

    fn from_row(row: EmployeeRow) -> hrdb_core::Result<Self> {
        Employee::from_stored(row.id, row.name, row.job_title, row.department_id)
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name().to_string()),
            Value::Text(self.job_title().to_string()),
            self.department_id().map_or(Value::Null, Value::Integer),
        ]
    }
}

impl Repository<Employee> {
    /// Construct and save an employee in one step
    ///
    /// # Errors
    /// Validation errors from construction; driver errors from the insert.
    pub fn create(
        &mut self,
        conn: &Connection,
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: i64,
    ) -> Result<Shared<Employee>> {
        let employee = Employee::new(name, job_title, department_id)?;
        self.insert(conn, employee)
    }

    /// First employee (lowest id) with exactly this name
    ///
    /// # Errors
    /// Driver and validation errors propagate.
    pub fn find_by_name(&mut self, conn: &Connection, name: &str) -> Result<Option<Shared<Employee>>> {
        self.find_first_where(conn, "name", &name)
    }

    /// Employees of one department, in id order
    ///
    /// # Errors
    /// Driver and validation errors propagate.
    pub fn for_department(
        &mut self,
        conn: &Connection,
        department_id: i64,
    ) -> Result<Vec<Shared<Employee>>> {
        self.find_all_where(conn, "department_id", &department_id)
    }

    /// Employees of a persisted department; empty for an unsaved one
    ///
    /// # Errors
    /// Driver and validation errors propagate.
    pub fn for_department_record(
        &mut self,
        conn: &Connection,
        department: &Shared<Department>,
    ) -> Result<Vec<Shared<Employee>>> {
        let department_id = department.borrow().id();
        match department_id {
            Some(id) => self.for_department(conn, id),
            None => Ok(Vec::new()),
        }
    }
}
