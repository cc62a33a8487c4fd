//! # snomed-types
//!
//! Domain types for SNOMED CT concepts assembled from a relational
//! reference store.
//!
//! This crate provides the assembled [`Concept`] (its descriptions with their
//! en-AU [`Acceptability`] and its reference set memberships), the
//! [`ConceptBuilder`] used to assemble it, and well-known identifiers.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use snomed_types::{Acceptability, ConceptBuilder, SctId};
//! use snomed_types::well_known;
//!
//! let mut builder = ConceptBuilder::new(230283005);
//! builder.add_description("Punch drunk", Some(well_known::PREFERRED));
//! let concept = builder.build();
//!
//! let id: SctId = concept.id();
//! assert_eq!(id, 230283005);
//! assert_eq!(concept.acceptability("Punch drunk"), Some(Acceptability::Preferred));
//! ```

#![warn(missing_docs)]

mod concept;
mod enums;
pub mod refset;
mod sctid;
pub mod well_known;

// Re-export all public types at crate root
pub use concept::{Concept, ConceptBuilder, ConceptError, Description};
pub use enums::Acceptability;
pub use refset::RefsetMembership;
pub use sctid::SctId;
