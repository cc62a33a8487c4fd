//! SNOMED CT reference set membership.
//!
//! A reference set (refset) is itself represented by a concept whose
//! preferred term is the refset's display name. A membership pairs that
//! refset concept with the concept that is a member.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use snomed_types::{ConceptBuilder, well_known};
//!
//! let mut refset = ConceptBuilder::new(32570331000036102);
//! refset.add_description("Body structure reference set", Some(well_known::PREFERRED));
//!
//! let mut member = ConceptBuilder::new(301000);
//! member.add_membership(Arc::new(refset.build()));
//! let member = member.build();
//!
//! let membership = member.memberships().next().unwrap();
//! assert_eq!(membership.refset_concept().preferred_term().unwrap(), "Body structure reference set");
//! assert_eq!(membership.referenced_concept().id(), 301000);
//! ```

use crate::Concept;

/// A membership of a concept in a reference set.
///
/// Both concepts are borrowed: the referenced concept is the concept the
/// membership was obtained from, and the refset concept is shared with every
/// other membership of the same refset assembled in the same lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefsetMembership<'a> {
    refset_concept: &'a Concept,
    referenced_concept: &'a Concept,
}

impl<'a> RefsetMembership<'a> {
    pub(crate) fn new(refset_concept: &'a Concept, referenced_concept: &'a Concept) -> Self {
        Self {
            refset_concept,
            referenced_concept,
        }
    }

    /// The concept representing the reference set.
    pub fn refset_concept(&self) -> &'a Concept {
        self.refset_concept
    }

    /// The concept that is a member of the reference set.
    pub fn referenced_concept(&self) -> &'a Concept {
        self.referenced_concept
    }
}
