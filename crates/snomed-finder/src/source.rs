//! Row source boundary.
//!
//! The finder never talks to a database directly. It hands a [`Query`] to a
//! [`RowSource`] and reads named columns from the returned [`Row`]s.

use std::sync::Arc;

use snomed_types::SctId;

use crate::types::{SourceError, SourceResult};

/// A single column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Real(f64),
    /// Text value.
    Text(String),
}

impl Value {
    /// Returns a short name of the value type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
        }
    }
}

impl From<SctId> for Value {
    /// SCTIDs that do not fit an `i64` become text, which no integer id column matches.
    fn from(id: SctId) -> Self {
        match i64::try_from(id) {
            Ok(v) => Self::Integer(v),
            Err(_) => Self::Text(id.to_string()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A parameterized query.
///
/// The SQL text is fixed at compile time; every filter value travels in
/// `params` and is bound positionally (`?1`, `?2`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Short name of the query, used in logs and error context.
    pub label: &'static str,
    /// SQL text with positional placeholders.
    pub sql: &'static str,
    /// Bound parameter values.
    pub params: Vec<Value>,
}

impl Query {
    /// Creates a query.
    pub fn new(label: &'static str, sql: &'static str, params: Vec<Value>) -> Self {
        Self { label, sql, params }
    }
}

/// A result row with named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.columns.push((name.into(), value.into()));
    }

    /// Builder-style [`Row::push`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    /// Returns the raw value of a column.
    pub fn get(&self, column: &str) -> SourceResult<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
            .ok_or_else(|| SourceError::MissingColumn {
                column: column.to_string(),
            })
    }

    /// Reads a non-null SCTID column.
    pub fn sctid(&self, column: &str) -> SourceResult<SctId> {
        self.optional_sctid(column)?
            .ok_or_else(|| SourceError::UnexpectedType {
                column: column.to_string(),
                expected: "integer",
                found: "null",
            })
    }

    /// Reads a nullable SCTID column.
    pub fn optional_sctid(&self, column: &str) -> SourceResult<Option<SctId>> {
        match self.get(column)? {
            Value::Null => Ok(None),
            Value::Integer(v) => parse::sctid_from_integer(column, *v).map(Some),
            Value::Text(s) => parse::sctid(column, s).map(Some),
            other => Err(SourceError::UnexpectedType {
                column: column.to_string(),
                expected: "integer",
                found: other.type_name(),
            }),
        }
    }

    /// Reads a non-null text column.
    pub fn text(&self, column: &str) -> SourceResult<&str> {
        match self.get(column)? {
            Value::Text(s) => Ok(s),
            other => Err(SourceError::UnexpectedType {
                column: column.to_string(),
                expected: "text",
                found: other.type_name(),
            }),
        }
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A read-only source of query results.
///
/// Implementations own connection handling, timeouts and cancellation; any
/// failure is returned as a [`SourceError`] and is fatal to the lookup that
/// issued the query.
pub trait RowSource {
    /// Runs `query` and returns its rows in order.
    ///
    /// When `limited` is true, at most [`RowSource::max_rows`] rows are
    /// returned (no limit when that value is zero or negative).
    fn run_query(&self, query: &Query, limited: bool) -> SourceResult<Vec<Row>>;

    /// The current row cap applied to limited queries.
    ///
    /// Read on every lookup, so it may change between calls.
    fn max_rows(&self) -> i64;
}

impl<S: RowSource + ?Sized> RowSource for &S {
    fn run_query(&self, query: &Query, limited: bool) -> SourceResult<Vec<Row>> {
        (**self).run_query(query, limited)
    }

    fn max_rows(&self) -> i64 {
        (**self).max_rows()
    }
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn run_query(&self, query: &Query, limited: bool) -> SourceResult<Vec<Row>> {
        (**self).run_query(query, limited)
    }

    fn max_rows(&self) -> i64 {
        (**self).max_rows()
    }
}

impl<S: RowSource + ?Sized> RowSource for Arc<S> {
    fn run_query(&self, query: &Query, limited: bool) -> SourceResult<Vec<Row>> {
        (**self).run_query(query, limited)
    }

    fn max_rows(&self) -> i64 {
        (**self).max_rows()
    }
}

/// Converts a `max_rows` setting into an optional cap.
pub(crate) fn row_cap(max_rows: i64) -> Option<usize> {
    if max_rows > 0 {
        Some(usize::try_from(max_rows).unwrap_or(usize::MAX))
    } else {
        None
    }
}

/// Helper functions for decoding column values.
mod parse {
    use super::{SctId, SourceError, SourceResult};

    /// Parses an SCTID stored as text.
    pub fn sctid(column: &str, value: &str) -> SourceResult<SctId> {
        value.trim().parse::<u64>().map_err(|_| SourceError::InvalidSctId {
            column: column.to_string(),
            value: value.to_string(),
        })
    }

    /// Converts an SCTID stored as an integer.
    pub fn sctid_from_integer(column: &str, value: i64) -> SourceResult<SctId> {
        u64::try_from(value).map_err(|_| SourceError::InvalidSctId {
            column: column.to_string(),
            value: value.to_string(),
        })
    }
}
