//! SNOMED CT Identifier (SCTID) type.
//!
//! SCTIDs are 64-bit unsigned integers. They are used here as opaque,
//! comparable keys: nothing in this workspace does arithmetic on them.

/// A SNOMED CT identifier (SCTID).
///
/// # Examples
///
/// ```
/// use snomed_types::SctId;
///
/// let concept_id: SctId = 301000; // Fifth metatarsal structure
/// let refset_id: SctId = 32570331000036102;
/// assert!(concept_id < refset_id);
/// ```
pub type SctId = u64;
