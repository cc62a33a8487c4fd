//! Assembled SNOMED CT concept.
//!
//! A [`Concept`] carries its active descriptions, each with its en-AU
//! acceptability, and the reference sets it is a member of. Concepts are
//! assembled once through a [`ConceptBuilder`] and are immutable afterwards.

use std::fmt;
use std::sync::Arc;

use crate::refset::RefsetMembership;
use crate::{Acceptability, SctId};

/// A description term of a concept together with its acceptability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Description {
    /// The description text.
    pub term: String,
    /// en-AU acceptability of the term.
    pub acceptability: Acceptability,
}

/// Errors raised by [`Concept`] accessors whose preconditions do not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConceptError {
    /// The concept was assembled without any description.
    NoDescriptions {
        /// The concept that has no descriptions.
        concept_id: SctId,
    },
}

impl fmt::Display for ConceptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDescriptions { concept_id } => {
                write!(f, "concept {} has no descriptions", concept_id)
            }
        }
    }
}

impl std::error::Error for ConceptError {}

/// A SNOMED CT concept assembled from the reference store.
///
/// # Examples
///
/// ```
/// use snomed_types::{Acceptability, Concept, ConceptBuilder, well_known};
///
/// let mut builder = ConceptBuilder::new(301000);
/// builder
///     .add_description("Fifth metatarsal bone structure", Some(well_known::ACCEPTABLE))
///     .add_description("Fifth metatarsal structure", Some(well_known::PREFERRED));
/// let concept: Concept = builder.build();
///
/// assert_eq!(concept.id(), 301000);
/// assert_eq!(concept.preferred_term().unwrap(), "Fifth metatarsal structure");
/// assert_eq!(
///     concept.acceptability("Fifth metatarsal bone structure"),
///     Some(Acceptability::Acceptable)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Concept {
    id: SctId,
    /// Unique by term, in insertion order.
    descriptions: Vec<Description>,
    /// Concepts representing the reference sets this concept belongs to.
    refsets: Vec<Arc<Concept>>,
}

impl Concept {
    /// Returns the identifier of this concept.
    pub fn id(&self) -> SctId {
        self.id
    }

    /// Returns the descriptions in insertion order.
    pub fn descriptions(&self) -> &[Description] {
        &self.descriptions
    }

    /// Returns the acceptability of `term`, if the concept has that description.
    pub fn acceptability(&self, term: &str) -> Option<Acceptability> {
        self.descriptions
            .iter()
            .find(|d| d.term == term)
            .map(|d| d.acceptability)
    }

    /// Returns the reference set memberships of this concept in insertion order.
    pub fn memberships(&self) -> impl ExactSizeIterator<Item = RefsetMembership<'_>> + '_ {
        self.refsets
            .iter()
            .map(move |refset| RefsetMembership::new(refset, self))
    }

    /// Returns true if this concept is a member of `refset_id`.
    pub fn is_member_of(&self, refset_id: SctId) -> bool {
        self.refsets.iter().any(|r| r.id == refset_id)
    }

    /// Returns the preferred term of this concept.
    ///
    /// The first description marked [`Acceptability::Preferred`] wins. If none
    /// is preferred, the first description in insertion order is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConceptError::NoDescriptions`] if the concept has no
    /// descriptions at all.
    pub fn preferred_term(&self) -> Result<&str, ConceptError> {
        self.descriptions
            .iter()
            .find(|d| d.acceptability == Acceptability::Preferred)
            .or_else(|| self.descriptions.first())
            .map(|d| d.term.as_str())
            .ok_or(ConceptError::NoDescriptions {
                concept_id: self.id,
            })
    }

    /// Renders a multi-line summary of the concept.
    ///
    /// Equivalent to `to_string()`; see the [`fmt::Display`] implementation.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// One line for the id, one per description (annotated with its en-AU
/// acceptability when it has one), one per refset membership, then a blank
/// line.
///
/// ```text
/// SCT ID 301000
/// 	Fifth metatarsal structure [EN-AU PREFERRED TERM]
/// 		 Is member of refset 'Body structure reference set'
/// ```
impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SCT ID {}", self.id)?;

        for description in &self.descriptions {
            write!(f, "\t{}", description.term)?;
            if description.acceptability.is_ranked() {
                write!(f, " [EN-AU {} TERM]", description.acceptability)?;
            }
            writeln!(f)?;
        }

        for membership in self.memberships() {
            let refset = membership.refset_concept();
            match refset.preferred_term() {
                Ok(term) => writeln!(f, "\t\t Is member of refset '{}'", term)?,
                Err(_) => writeln!(f, "\t\t Is member of refset {}", refset.id)?,
            }
        }

        writeln!(f)
    }
}

/// Staged construction of a [`Concept`].
///
/// Descriptions and memberships are accumulated here and frozen by
/// [`ConceptBuilder::build`].
#[derive(Debug, Clone)]
pub struct ConceptBuilder {
    id: SctId,
    descriptions: Vec<Description>,
    refsets: Vec<Arc<Concept>>,
}

impl ConceptBuilder {
    /// Starts a concept with no descriptions or memberships.
    pub fn new(id: SctId) -> Self {
        Self {
            id,
            descriptions: Vec::new(),
            refsets: Vec::new(),
        }
    }

    /// Returns the identifier of the concept being built.
    pub fn id(&self) -> SctId {
        self.id
    }

    /// Adds a description, resolving its acceptability from the language
    /// reference set attribute value.
    ///
    /// Adding a term that is already present overwrites its acceptability and
    /// keeps its original position.
    pub fn add_description(
        &mut self,
        term: impl Into<String>,
        acceptability_id: Option<SctId>,
    ) -> &mut Self {
        let term = term.into();
        let acceptability = Acceptability::resolve(acceptability_id);

        match self.descriptions.iter_mut().find(|d| d.term == term) {
            Some(existing) => existing.acceptability = acceptability,
            None => self.descriptions.push(Description {
                term,
                acceptability,
            }),
        }
        self
    }

    /// Returns true if a description with this exact term was already added.
    pub fn has_description(&self, term: &str) -> bool {
        self.descriptions.iter().any(|d| d.term == term)
    }

    /// Records membership of the reference set represented by `refset`.
    pub fn add_membership(&mut self, refset: Arc<Concept>) -> &mut Self {
        self.refsets.push(refset);
        self
    }

    /// Freezes the accumulated state into a [`Concept`].
    pub fn build(self) -> Concept {
        Concept {
            id: self.id,
            descriptions: self.descriptions,
            refsets: self.refsets,
        }
    }
}
