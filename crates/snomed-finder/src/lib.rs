//! # snomed-finder
//!
//! Concept lookup and assembly over a relational SNOMED CT reference store.
//!
//! [`ConceptFinder`] answers three lookups (by id, by term fragment, and by
//! refset membership) and assembles each matching concept together with its
//! descriptions and the refset concepts it is a member of. Storage is reached
//! through the [`RowSource`] trait; [`SqliteSource`] implements it for a
//! SQLite reference database.
//!
//! ## Features
//!
//! - `sqlite` (default): Enables [`SqliteSource`] via rusqlite.
//!
//! ## Usage
//!
//! ```ignore
//! use snomed_finder::{ConceptFinder, SqliteSource};
//!
//! let finder = ConceptFinder::new(SqliteSource::open("snomed.db")?.with_max_rows(25));
//!
//! let concepts = finder.find_by_term("drunk")?;
//! if finder.is_limited(concepts.len()) {
//!     println!("showing the first {} matches", concepts.len());
//! }
//! for concept in &concepts {
//!     print!("{}", concept.render());
//! }
//! ```

#![warn(missing_docs)]

mod finder;
pub mod queries;
mod source;
#[cfg(feature = "sqlite")]
mod sqlite;
mod types;

pub use finder::ConceptFinder;
pub use source::{Query, Row, RowSource, Value};
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteSource, DEFAULT_MAX_ROWS};
pub use types::{FinderConfig, FinderError, FinderResult, SourceError, SourceResult};

// Re-export snomed-types for convenience
pub use snomed_types;
