//! Table mapping for entities persisted by [`Repository`](super::Repository)

use hrdb_core::model::Record;
use rusqlite::types::Value;
use rusqlite::Row;

/// How an entity maps onto its SQLite table
///
/// Every table has an `INTEGER PRIMARY KEY` named `id` followed by
/// [`SqlRecord::COLUMNS`]. Rows are selected as `id, COLUMNS...` in that
/// order.
pub trait SqlRecord: Record + Sized {
    /// Raw row as read from the database
    type Row;

    const TABLE: &'static str;

    /// Idempotent `CREATE TABLE IF NOT EXISTS` statement
    const CREATE_TABLE_SQL: &'static str;

    /// Columns other than `id`, in insert and update order
    const COLUMNS: &'static [&'static str];

    /// Decode a row selected as `id, COLUMNS...`
    ///
    /// # Errors
    /// Driver errors for missing columns or mismatched types.
    fn read_row(row: &Row<'_>) -> rusqlite::Result<Self::Row>;

    fn row_id(row: &Self::Row) -> i64;

    /// Build a validated, persisted instance from a raw row
    ///
    /// # Errors
    /// Validation errors when the stored values break entity rules.
    fn from_row(row: Self::Row) -> hrdb_core::Result<Self>;

    /// Current values for [`SqlRecord::COLUMNS`]
    fn values(&self) -> Vec<Value>;
}

pub(crate) fn select_sql<T: SqlRecord>() -> String {
    format!("SELECT id, {} FROM {}", T::COLUMNS.join(", "), T::TABLE)
}

pub(crate) fn insert_sql<T: SqlRecord>() -> String {
    let placeholders: Vec<String> = (1..=T::COLUMNS.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        T::TABLE,
        T::COLUMNS.join(", "),
        placeholders.join(", ")
    )
}

pub(crate) fn update_sql<T: SqlRecord>() -> String {
    let assignments: Vec<String> = T::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ?{}", column, i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = ?{}",
        T::TABLE,
        assignments.join(", "),
        T::COLUMNS.len() + 1
    )
}

pub(crate) fn delete_sql<T: SqlRecord>() -> String {
    format!("DELETE FROM {} WHERE id = ?1", T::TABLE)
}

pub(crate) fn drop_table_sql<T: SqlRecord>() -> String {
    format!("DROP TABLE IF EXISTS {}", T::TABLE)
}
