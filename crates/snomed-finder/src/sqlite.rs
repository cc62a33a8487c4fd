//! SQLite-backed row source.
//!
//! Reads a reference database produced by the bulk loader. The connection is
//! held behind a mutex so one source can serve concurrent lookups.

use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, OpenFlags, ToSql};

use crate::source::{row_cap, Query, Row, RowSource, Value};
use crate::types::{SourceError, SourceResult};

/// Default row cap for limited queries.
pub const DEFAULT_MAX_ROWS: i64 = 100;

/// A [`RowSource`] over a SQLite database.
///
/// # Example
///
/// ```ignore
/// use snomed_finder::{ConceptFinder, SqliteSource};
///
/// let source = SqliteSource::open("snomed.db")?.with_max_rows(50);
/// let finder = ConceptFinder::new(source);
/// let concepts = finder.find_by_term("metatarsal")?;
/// ```
pub struct SqliteSource {
    conn: Mutex<Connection>,
    max_rows: AtomicI64,
}

impl std::fmt::Debug for SqliteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSource")
            .field("max_rows", &self.max_rows())
            .finish_non_exhaustive()
    }
}

impl SqliteSource {
    /// Opens an existing database file read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> SourceResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self::from_connection(conn))
    }

    /// Opens an empty in-memory database.
    pub fn open_in_memory() -> SourceResult<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    /// Wraps an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            max_rows: AtomicI64::new(DEFAULT_MAX_ROWS),
        }
    }

    /// Sets the row cap and returns the source.
    pub fn with_max_rows(self, max_rows: i64) -> Self {
        self.set_max_rows(max_rows);
        self
    }

    /// Changes the row cap; zero or negative disables it.
    ///
    /// Takes effect on the next query.
    pub fn set_max_rows(&self, max_rows: i64) {
        self.max_rows.store(max_rows, Ordering::Relaxed);
    }

    /// Executes a batch of statements, such as a schema and fixture rows.
    pub fn execute_batch(&self, sql: &str) -> SourceResult<()> {
        let conn = self.conn.lock().map_err(|_| SourceError::Poisoned)?;
        conn.execute_batch(sql)?;
        Ok(())
    }
}

impl RowSource for SqliteSource {
    fn run_query(&self, query: &Query, limited: bool) -> SourceResult<Vec<Row>> {
        let cap = if limited {
            row_cap(self.max_rows())
        } else {
            None
        };

        let conn = self.conn.lock().map_err(|_| SourceError::Poisoned)?;
        let mut stmt = conn.prepare_cached(query.sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query(params_from_iter(query.params.iter()))?;
        let mut results = Vec::new();

        loop {
            if cap.is_some_and(|cap| results.len() >= cap) {
                break;
            }
            let Some(row) = rows.next()? else {
                break;
            };

            let mut result = Row::new();
            for (index, name) in names.iter().enumerate() {
                let value = match row.get_ref(index)? {
                    ValueRef::Null => Value::Null,
                    ValueRef::Integer(v) => Value::Integer(v),
                    ValueRef::Real(v) => Value::Real(v),
                    ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
                    ValueRef::Blob(_) => {
                        return Err(SourceError::UnexpectedType {
                            column: name.clone(),
                            expected: "integer or text",
                            found: "blob",
                        })
                    }
                };
                result.push(name.as_str(), value);
            }
            results.push(result);
        }

        Ok(results)
    }

    fn max_rows(&self) -> i64 {
        self.max_rows.load(Ordering::Relaxed)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Integer(v) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*v)),
            Value::Real(v) => ToSqlOutput::Owned(rusqlite::types::Value::Real(*v)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}
