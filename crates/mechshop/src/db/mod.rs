//! SQLite-backed storage for the shop.

pub mod query;
pub mod schema;

pub use query::QueryResult;
pub use schema::{get_table_info, TableInfo, TABLES};

use crate::error::{Result, ShopError};
use rusqlite::{Connection, OptionalExtension, Params};
use std::path::Path;

/// Handle to the shop database.
///
/// Opening a `ShopDb` turns on foreign key enforcement and creates any
/// missing tables, so every handle is ready for the shop operations in
/// [`crate::shop`] and the reports in [`crate::reports`].
pub struct ShopDb {
    conn: Connection,
}

impl ShopDb {
    /// Opens (or creates) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Opening shop database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Creates every table that does not exist yet.
    pub fn init_schema(&self) -> Result<()> {
        for table in TABLES {
            self.conn.execute(table.create_sql, [])?;
        }
        Ok(())
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Returns the next free surrogate key for `table`.
    pub fn next_id(&self, table: &str) -> Result<i64> {
        next_id(&self.conn, table)
    }

    /// Counts rows in a catalogued table.
    pub fn count_rows(&self, table: &str) -> Result<i64> {
        let info =
            get_table_info(table).ok_or_else(|| ShopError::TableNotFound(table.to_string()))?;
        let sql = format!("SELECT COUNT(*) FROM {}", info.name);
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }

    /// Executes a read query and returns the rows.
    pub fn query<P: Params>(&self, sql: &str, params: P) -> Result<QueryResult> {
        tracing::debug!(sql, "query");
        let mut stmt = self.conn.prepare(sql)?;
        Ok(QueryResult::collect(&mut stmt, params)?)
    }
}

/// `MAX(key) + 1` for a catalogued table, or 1 when the table is empty.
///
/// Only tables with an integer surrogate key are accepted so the table and
/// column names are never taken from user input.
pub(crate) fn next_id(conn: &Connection, table: &str) -> Result<i64> {
    let info = get_table_info(table).ok_or_else(|| ShopError::TableNotFound(table.to_string()))?;
    let column = info.id_column.ok_or_else(|| {
        ShopError::Validation(format!("table {} has no integer key", info.name))
    })?;

    let sql = format!("SELECT MAX({}) FROM {}", column, info.name);
    let max: Option<i64> = conn
        .query_row(&sql, [], |row| row.get(0))
        .optional()?
        .flatten();

    match max {
        None => Ok(1),
        Some(m) => m.checked_add(1).ok_or_else(|| {
            ShopError::Validation(format!("{}.{} has no ids left after {}", info.name, column, m))
        }),
    }
}
