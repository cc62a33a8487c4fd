//! # snomed-lookup
//!
//! Command-line front end for [`snomed_finder::ConceptFinder`] over a SQLite
//! reference database. Configuration comes from `SNOMED_*` environment
//! variables; see [`LookupConfig`].

#![warn(missing_docs)]

mod command;
mod config;
pub mod report;

pub use command::{Command, USAGE};
pub use config::LookupConfig;

use snomed_finder::{FinderError, SourceError};
use thiserror::Error;

/// Errors reported by the lookup binary.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Bad command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// An SCT ID argument that is not an unsigned integer.
    #[error("Invalid SCT ID '{0}'")]
    InvalidId(String),

    /// The reference database could not be opened.
    #[error("Cannot open reference database: {0}")]
    Open(#[from] SourceError),

    /// The finder failed.
    #[error(transparent)]
    Finder(#[from] FinderError),

    /// Writing the report failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LookupError {
    /// Process exit status for this error: 2 for bad arguments, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            LookupError::Usage(_) | LookupError::InvalidId(_) => 2,
            _ => 1,
        }
    }
}
