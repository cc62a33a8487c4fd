//! Error and configuration types for concept lookup.

use snomed_types::SctId;
use thiserror::Error;

/// Errors raised by a [`RowSource`](crate::RowSource) while running a query
/// or decoding its rows.
#[derive(Error, Debug)]
pub enum SourceError {
    /// SQLite error.
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A row did not contain the requested column.
    #[error("Missing column in result row: {column}")]
    MissingColumn {
        /// The name of the missing column.
        column: String,
    },

    /// A column held a value of the wrong type.
    #[error("Unexpected value in column '{column}': expected {expected}, found {found}")]
    UnexpectedType {
        /// The column name.
        column: String,
        /// The expected value type.
        expected: &'static str,
        /// The value type that was found.
        found: &'static str,
    },

    /// An identifier column held a value that is not a valid SCTID.
    #[error("Invalid SCTID in column '{column}': {value}")]
    InvalidSctId {
        /// The column name.
        column: String,
        /// The invalid value.
        value: String,
    },

    /// The connection lock was poisoned by a panicking reader.
    #[error("Connection lock poisoned")]
    Poisoned,

    /// Any other backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Errors that can occur while finding and assembling concepts.
#[derive(Error, Debug)]
pub enum FinderError {
    /// The row source failed; the originating error is kept as the source.
    #[error("Storage failure during {operation}: {source}")]
    Storage {
        /// The query and identifier or term being looked up.
        operation: String,
        /// The underlying row source error.
        #[source]
        source: SourceError,
    },

    /// A concept is a member of a refset that is unknown or inactive.
    #[error("Invalid refset membership of concept {concept_id}. Unknown or inactive refset concept: {refset_id}")]
    ReferentialIntegrity {
        /// The member concept.
        concept_id: SctId,
        /// The refset id that could not be resolved.
        refset_id: SctId,
    },

    /// A refset is, directly or transitively, a member of itself.
    #[error("Cyclic refset membership: refset {refset_id} reached again via {path:?}")]
    MembershipCycle {
        /// The refset that was reached a second time.
        refset_id: SctId,
        /// The concepts being assembled when the cycle was found, outermost first.
        path: Vec<SctId>,
    },

    /// Refset resolution nested deeper than the configured limit.
    #[error("Refset resolution for concept {concept_id} exceeded maximum depth {max_depth}")]
    DepthExceeded {
        /// The concept whose assembly would exceed the limit.
        concept_id: SctId,
        /// The configured limit.
        max_depth: usize,
    },
}

impl FinderError {
    pub(crate) fn storage(operation: impl Into<String>, source: SourceError) -> Self {
        Self::Storage {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for finder operations.
pub type FinderResult<T> = Result<T, FinderError>;

/// Result type for row source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Configuration for a [`ConceptFinder`](crate::ConceptFinder).
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Maximum nesting of refset resolution below a top-level concept.
    pub max_depth: usize,
    /// Reuse refset concepts already assembled within the same lookup.
    pub cache_refsets: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            cache_refsets: true,
        }
    }
}

impl FinderConfig {
    /// Creates a config that re-reads every refset from storage.
    pub fn uncached() -> Self {
        Self {
            cache_refsets: false,
            ..Self::default()
        }
    }
}
