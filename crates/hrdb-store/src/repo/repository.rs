//! Generic repository over one table
//!
//! Each operation issues a single statement on a connection in autocommit
//! mode. Every fetch path funnels through [`Repository::instance_from_db`],
//! so at most one live instance exists per database id.

use std::rc::Rc;
use std::time::Instant;

use hrdb_core::errors::HrError;
use hrdb_core::model::{shared, Shared};
use hrdb_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::{params_from_iter, Connection, OptionalExtension, Params, ToSql};

use super::identity_map::IdentityMap;
use super::record::{delete_sql, drop_table_sql, insert_sql, select_sql, update_sql, SqlRecord};
use crate::errors::{from_rusqlite, Result};

/// Repository owning the identity map for one entity type
pub struct Repository<T> {
    cache: IdentityMap<T>,
}

impl<T: SqlRecord> Repository<T> {
    pub fn new() -> Self {
        Self {
            cache: IdentityMap::new(),
        }
    }

    /// Read access to the identity map
    pub fn cache(&self) -> &IdentityMap<T> {
        &self.cache
    }

    /// Forget every cached instance
    ///
    /// Handles held by callers stay valid but are no longer returned by
    /// later fetches.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Create the table if it does not exist
    ///
    /// # Errors
    /// `Persistence` on driver failure.
    pub fn create_table(conn: &Connection) -> Result<()> {
        with_lifecycle::<T, _, _>("create_table", || {
            conn.execute_batch(T::CREATE_TABLE_SQL)
                .map_err(from_rusqlite)
        })
    }

    /// Drop the table if it exists
    ///
    /// # Errors
    /// `Persistence` on driver failure.
    pub fn drop_table(conn: &Connection) -> Result<()> {
        with_lifecycle::<T, _, _>("drop_table", || {
            conn.execute_batch(&drop_table_sql::<T>())
                .map_err(from_rusqlite)
        })
    }

    /// Insert a new row for `record`, assign its id and cache it
    ///
    /// # Errors
    /// `AlreadyExists` if the record already has an id; driver errors
    /// propagate unchanged.
    pub fn save(&mut self, conn: &Connection, record: &Shared<T>) -> Result<()> {
        with_lifecycle::<T, _, _>("save", || {
            if let Some(id) = record.borrow().id() {
                return Err(HrError::AlreadyPersisted {
                    entity: T::ENTITY,
                    id,
                }
                .into());
            }

            let values = record.borrow().values();
            conn.execute(&insert_sql::<T>(), params_from_iter(values.iter()))
                .map_err(from_rusqlite)?;

            let id = conn.last_insert_rowid();
            record.borrow_mut().mark_persisted(id);
            self.cache.insert(id, Rc::clone(record));
            tracing::debug!(table = T::TABLE, entity_id = id, "saved row");
            Ok(())
        })
    }

    /// Wrap `record` in a shared handle and save it
    ///
    /// # Errors
    /// Same as [`Repository::save`].
    pub fn insert(&mut self, conn: &Connection, record: T) -> Result<Shared<T>> {
        let record = shared(record);
        self.save(conn, &record)?;
        Ok(record)
    }

    /// Resolve a raw row to its single in-memory instance
    ///
    /// A cached instance is refreshed in place from the row unless it is
    /// currently borrowed; otherwise a new instance is built, cached and
    /// returned.
    ///
    /// # Errors
    /// Validation errors if the stored values break entity rules.
    pub fn instance_from_db(&mut self, row: T::Row) -> Result<Shared<T>> {
        let id = T::row_id(&row);
        let fresh = T::from_row(row)?;

        if let Some(cached) = self.cache.get(id) {
            // A caller holding a borrow already sees the cached instance.
            match cached.try_borrow_mut() {
                Ok(mut instance) => instance.refresh_from(fresh),
                Err(_) => tracing::debug!(
                    table = T::TABLE,
                    entity_id = id,
                    "refresh skipped, instance borrowed"
                ),
            }
            tracing::debug!(table = T::TABLE, entity_id = id, "identity map hit");
            return Ok(cached);
        }

        let record = shared(fresh);
        self.cache.insert(id, Rc::clone(&record));
        Ok(record)
    }

    /// Every row, in id order
    ///
    /// # Errors
    /// Driver and validation errors propagate.
    pub fn get_all(&mut self, conn: &Connection) -> Result<Vec<Shared<T>>> {
        let sql = format!("{} ORDER BY id", select_sql::<T>());
        let rows = query_rows::<T, _>(conn, &sql, [])?;
        tracing::debug!(table = T::TABLE, row_count = rows.len(), "loaded rows");
        self.materialize(rows)
    }

    /// The row with primary key `id`, if any
    ///
    /// # Errors
    /// Driver and validation errors propagate.
    pub fn find_by_id(&mut self, conn: &Connection, id: i64) -> Result<Option<Shared<T>>> {
        let sql = format!("{} WHERE id = ?1", select_sql::<T>());
        let row = conn
            .query_row(&sql, [id], |row| T::read_row(row))
            .optional()
            .map_err(from_rusqlite)?;

        row.map(|row| self.instance_from_db(row)).transpose()
    }

    /// Write the record's current field values to its row
    ///
    /// # Errors
    /// `NotPersisted` without an id, `NotFound` if the row no longer
    /// exists; driver errors propagate.
    pub fn update(&self, conn: &Connection, record: &Shared<T>) -> Result<()> {
        with_lifecycle::<T, _, _>("update", || {
            let (id, mut values) = {
                let record = record.borrow();
                let id = record
                    .id()
                    .ok_or(HrError::NotPersisted { entity: T::ENTITY })?;
                (id, record.values())
            };
            values.push(id.into());

            let changed = conn
                .execute(&update_sql::<T>(), params_from_iter(values.iter()))
                .map_err(from_rusqlite)?;
            if changed == 0 {
                return Err(HrError::RowNotFound {
                    entity: T::ENTITY,
                    id,
                }
                .into());
            }
            Ok(())
        })
    }

    /// Delete the record's row, evict it and reset its id
    ///
    /// Other field values are kept, so the record may be saved again as a
    /// new row.
    ///
    /// # Errors
    /// `NotPersisted` without an id; driver errors propagate.
    pub fn delete(&mut self, conn: &Connection, record: &Shared<T>) -> Result<()> {
        with_lifecycle::<T, _, _>("delete", || {
            let id = record
                .borrow()
                .id()
                .ok_or(HrError::NotPersisted { entity: T::ENTITY })?;

            conn.execute(&delete_sql::<T>(), [id])
                .map_err(from_rusqlite)?;

            if let Some(cached) = self.cache.remove(id) {
                if !Rc::ptr_eq(&cached, record) {
                    if let Ok(mut instance) = cached.try_borrow_mut() {
                        instance.mark_unpersisted();
                    }
                }
            }
            record.borrow_mut().mark_unpersisted();
            Ok(())
        })
    }

    /// Rows whose `column` equals `value`, in id order
    pub(crate) fn find_all_where(
        &mut self,
        conn: &Connection,
        column: &str,
        value: &dyn ToSql,
    ) -> Result<Vec<Shared<T>>> {
        debug_assert!(T::COLUMNS.contains(&column));
        let sql = format!("{} WHERE {} = ?1 ORDER BY id", select_sql::<T>(), column);
        let rows = query_rows::<T, _>(conn, &sql, [value])?;
        self.materialize(rows)
    }

    /// First row (lowest id) whose `column` equals `value`
    pub(crate) fn find_first_where(
        &mut self,
        conn: &Connection,
        column: &str,
        value: &dyn ToSql,
    ) -> Result<Option<Shared<T>>> {
        debug_assert!(T::COLUMNS.contains(&column));
        let sql = format!(
            "{} WHERE {} = ?1 ORDER BY id LIMIT 1",
            select_sql::<T>(),
            column
        );
        let row = conn
            .query_row(&sql, [value], |row| T::read_row(row))
            .optional()
            .map_err(from_rusqlite)?;

        row.map(|row| self.instance_from_db(row)).transpose()
    }

    fn materialize(&mut self, rows: Vec<T::Row>) -> Result<Vec<Shared<T>>> {
        rows.into_iter()
            .map(|row| self.instance_from_db(row))
            .collect()
    }
}

impl<T: SqlRecord> Default for Repository<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn query_rows<T: SqlRecord, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<T::Row>> {
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let rows = stmt
        .query_map(params, |row| T::read_row(row))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

/// Run a mutating operation between start and end/error lifecycle events
///
/// The logged op is `<table>_<action>`, e.g. `reviews_save`.
fn with_lifecycle<T, R, F>(action: &str, f: F) -> Result<R>
where
    T: SqlRecord,
    F: FnOnce() -> Result<R>,
{
    let op = format!("{}_{}", T::TABLE, action);
    log_op_start!(op.as_str(), table = T::TABLE);
    let start = Instant::now();

    match f() {
        Ok(value) => {
            log_op_end!(
                op.as_str(),
                duration_ms = start.elapsed().as_millis() as u64,
                table = T::TABLE
            );
            Ok(value)
        }
        Err(err) => {
            log_op_error!(
                op.as_str(),
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                table = T::TABLE
            );
            Err(err)
        }
    }
}
