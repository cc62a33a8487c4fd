//! Parameterized queries against the reference schema.
//!
//! Tables and the columns read here:
//!
//! | Table | Columns |
//! |-------|---------|
//! | `concepts` | `id`, `active` |
//! | `descriptions` | `id`, `effectivetime`, `active`, `conceptid`, `term` |
//! | `description_refset` | `effectivetime`, `referenceddescriptionid`, `valueid` |
//! | `concept_refset` | `refsetid`, `referencedconceptid` |
//!
//! The active status value is bound as a parameter from
//! [`well_known::ACTIVE_STATUS`], and description acceptability is read from
//! the [`well_known::AUSTRALIAN_DIALECT_REFSET`] only.

use snomed_types::{well_known, SctId};

use crate::source::{Query, Value};

const CONCEPT_BY_ID: &str = "\
    SELECT concept.id AS id \
    FROM concepts concept \
    WHERE concept.id = ?1 \
      AND concept.active = ?2";

const CONCEPTS_BY_TERM: &str = "\
    SELECT DISTINCT concept.id AS id \
    FROM concepts concept \
    JOIN descriptions description ON description.conceptid = concept.id \
    WHERE description.term LIKE ?1 ESCAPE '\\' \
      AND description.active = ?2 \
      AND concept.active = ?2 \
    ORDER BY concept.id DESC";

// Membership rows are not filtered on their own active flag, only the concept.
const REFSET_MEMBERS: &str = "\
    SELECT DISTINCT concept.id AS id \
    FROM concepts concept \
    JOIN concept_refset refset_member ON refset_member.referencedconceptid = concept.id \
    WHERE refset_member.refsetid = ?1 \
      AND concept.active = ?2 \
    ORDER BY concept.id ASC";

const CONCEPT_DESCRIPTIONS: &str = "\
    SELECT description.term AS term, adrs.valueid AS valueid \
    FROM concepts concept \
    JOIN descriptions description ON description.conceptid = concept.id \
    LEFT JOIN description_refset adrs ON adrs.referenceddescriptionid = description.id \
      AND adrs.refsetid = ?2 \
    WHERE concept.id = ?1 \
      AND description.active = ?3 \
      AND concept.active = ?3 \
    ORDER BY description.term, description.effectivetime DESC, adrs.effectivetime DESC";

const CONCEPT_REFSETS: &str = "\
    SELECT DISTINCT refset_member.refsetid AS refsetid \
    FROM concepts concept \
    JOIN concept_refset refset_member ON refset_member.referencedconceptid = concept.id \
    WHERE concept.id = ?1 \
      AND concept.active = ?2 \
    ORDER BY refset_member.refsetid";

/// The active concept with this id. Yields column `id`.
pub fn concept_by_id(id: SctId) -> Query {
    Query::new("concept_by_id", CONCEPT_BY_ID, vec![Value::from(id), active()])
}

/// Distinct active concepts with an active description containing `fragment`,
/// highest id first. Yields column `id`.
pub fn concepts_by_term(fragment: &str) -> Query {
    let pattern = format!("%{}%", escape_like(fragment));
    Query::new(
        "concepts_by_term",
        CONCEPTS_BY_TERM,
        vec![Value::Text(pattern), active()],
    )
}

/// Distinct active concepts referenced by a member row of `refset_id`,
/// lowest id first. Yields column `id`.
pub fn refset_members(refset_id: SctId) -> Query {
    Query::new(
        "refset_members",
        REFSET_MEMBERS,
        vec![Value::from(refset_id), active()],
    )
}

/// Active descriptions of an active concept with their en-AU acceptability.
/// Yields columns `term` and `valueid` (nullable).
pub fn concept_descriptions(concept_id: SctId) -> Query {
    Query::new(
        "concept_descriptions",
        CONCEPT_DESCRIPTIONS,
        vec![
            Value::from(concept_id),
            Value::from(well_known::AUSTRALIAN_DIALECT_REFSET),
            active(),
        ],
    )
}

/// Distinct refsets an active concept is a member of. Yields column `refsetid`.
pub fn concept_refsets(concept_id: SctId) -> Query {
    Query::new(
        "concept_refsets",
        CONCEPT_REFSETS,
        vec![Value::from(concept_id), active()],
    )
}

fn active() -> Value {
    Value::Integer(well_known::ACTIVE_STATUS)
}

/// Escapes `LIKE` wildcards so `fragment` matches literally.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
