//! Row source over a SQLite connection.

use rusqlite::Connection;
use rusqlite::types::ValueRef;

use super::RowSource;
use crate::error::SourceError;
use crate::model::Cell;

/// Runs browser queries on a rusqlite connection.
///
/// Every result column becomes a scalar cell; `NULL` becomes an empty
/// string.
pub struct SqliteSource<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteSource<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl RowSource for SqliteSource<'_> {
    fn count(&mut self, sql: &str) -> Result<usize, SourceError> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        usize::try_from(count).map_err(|_| SourceError::InvalidCount(count))
    }

    fn fetch(&mut self, sql: &str, limit: usize, offset: usize) -> Result<Vec<Vec<Cell>>, SourceError> {
        let mut stmt = self.conn.prepare(&format!("{} LIMIT {} OFFSET {}", sql, limit, offset))?;
        let width = stmt.column_count();
        let rows = stmt.query_map([], |row| {
            (0..width)
                .map(|i| row.get_ref(i).map(cell_from_value))
                .collect::<Result<Vec<_>, _>>()
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn cell_from_value(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null => Cell::from(""),
        ValueRef::Integer(n) => Cell::from(n),
        ValueRef::Real(f) => Cell::from(f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => Cell::from(String::from_utf8_lossy(bytes).into_owned()),
    }
}
