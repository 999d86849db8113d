//! `reviews` table mapping

use hrdb_core::model::{Employee, Review, Shared};
use hrdb_core::YearInput;
use rusqlite::types::Value;
use rusqlite::{Connection, Row};

use super::record::SqlRecord;
use super::repository::Repository;
use crate::errors::Result;

/// Raw `reviews` row: `(id, year, summary, employee_id)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub id: i64,
    pub year: i64,
    pub summary: String,
    pub employee_id: Option<i64>,
}

impl SqlRecord for Review {
    type Row = ReviewRow;

    const TABLE: &'static str = "reviews";

    const CREATE_TABLE_SQL: &'static str = "
        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY,
            year INTEGER,
            summary TEXT,
            employee_id INTEGER
        )";

    const COLUMNS: &'static [&'static str] = &["year", "summary", "employee_id"];

    fn read_row(row: &Row<'_>) -> rusqlite::Result<ReviewRow> {
        Ok(ReviewRow {
            id: row.get(0)?,
            year: row.get(1)?,
            summary: row.get(2)?,
            employee_id: row.get(3)?,
        })
    }

    fn row_id(row: &ReviewRow) -> i64 {
        row.id
    }

    fn from_row(row: ReviewRow) -> hrdb_core::Result<Self> {
        Review::from_stored(row.id, row.year, row.summary, row.employee_id)
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.year()),
            Value::Text(self.summary().to_string()),
            self.employee_id().map_or(Value::Null, Value::Integer),
        ]
    }
}

impl Repository<Review> {
    /// Construct and save a review in one step
    ///
    /// `employee_id` is not checked against the employees table, matching
    /// [`Review::new`].
    ///
    /// # Errors
    /// Validation errors from construction; driver errors from the insert.
    pub fn create(
        &mut self,
        conn: &Connection,
        year: impl Into<YearInput>,
        summary: impl Into<String>,
        employee_id: i64,
    ) -> Result<Shared<Review>> {
        let review = Review::new(year, summary, employee_id)?;
        self.insert(conn, review)
    }

    /// Reviews of one employee, in creation (id) order
    ///
    /// # Errors
    /// Driver and validation errors propagate.
    pub fn for_employee(
        &mut self,
        conn: &Connection,
        employee_id: i64,
    ) -> Result<Vec<Shared<Review>>> {
        self.find_all_where(conn, "employee_id", &employee_id)
    }

    /// Reviews of a persisted employee; empty for an unsaved one
    ///
    /// # Errors
    /// Driver and validation errors propagate.
    pub fn for_employee_record(
        &mut self,
        conn: &Connection,
        employee: &Shared<Employee>,
    ) -> Result<Vec<Shared<Review>>> {
        let employee_id = employee.borrow().id();
        match employee_id {
            Some(id) => self.for_employee(conn, id),
            None => Ok(Vec::new()),
        }
    }
}
