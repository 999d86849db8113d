//! `departments` table mapping

use hrdb_core::model::{Department, Shared};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};

use super::record::SqlRecord;
use super::repository::Repository;
use crate::errors::Result;

/// Raw `departments` row: `(id, name, location)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRow {
    pub id: i64,
    pub name: String,
    pub location: String,
}

impl SqlRecord for Department {
    type Row = DepartmentRow;

    const TABLE: &'static str = "departments";

    const CREATE_TABLE_SQL: &'static str = "
        CREATE TABLE IF NOT EXISTS departments (
            id INTEGER PRIMARY KEY,
            name TEXT,
            location TEXT
        )";

    const COLUMNS: &'static [&'static str] = &["name", "location"];

    fn read_row(row: &Row<'_>) -> rusqlite::Result<DepartmentRow> {
        Ok(DepartmentRow {
            id: row.get(0)?,
            name: row.get(1)?,
            location: row.get(2)?,
        })
    }

    fn row_id(row: &DepartmentRow) -> i64 {
        row.id
    }

    fn from_row(row: DepartmentRow) -> hrdb_core::Result<Self> {
        Ok(Department::new(row.name, row.location)?.with_id(row.id))
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name().to_string()),
            Value::Text(self.location().to_string()),
        ]
    }
}

impl Repository<Department> {
    /// Construct and save a department in one step
    ///
    /// # Errors
    /// Validation errors from construction; driver errors from the insert.
    pub fn create(
        &mut self,
        conn: &Connection,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Shared<Department>> {
        let department = Department::new(name, location)?;
        self.insert(conn, department)
    }

    /// First department (lowest id) with exactly this name
    ///
    /// # Errors
    /// Driver and validation errors propagate.
    pub fn find_by_name(
        &mut self,
        conn: &Connection,
        name: &str,
    ) -> Result<Option<Shared<Department>>> {
        self.find_first_where(conn, "name", &name)
    }
}
