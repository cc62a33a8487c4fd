//! Well-known SNOMED CT and SNOMED CT-AU identifiers and status values.
//!
//! # Examples
//!
//! ```
//! use snomed_types::well_known;
//!
//! assert_eq!(well_known::PREFERRED, 900000000000548007);
//! assert_eq!(well_known::ACTIVE_STATUS, 1);
//! ```

use crate::SctId;

// =============================================================================
// Status
// =============================================================================

/// RF2 `active` column value for active rows.
pub const ACTIVE_STATUS: i64 = 1;

// =============================================================================
// Acceptability
// =============================================================================

/// Preferred acceptability concept - 900000000000548007.
///
/// Attribute value of a language reference set member whose description is
/// the preferred term in that dialect.
pub const PREFERRED: SctId = 900000000000548007;

/// Acceptable acceptability concept - 900000000000549004.
pub const ACCEPTABLE: SctId = 900000000000549004;

/// Sentinel used when a description has no language reference set member.
pub const NO_ACCEPTABILITY: SctId = 0;

// =============================================================================
// Reference Sets
// =============================================================================

/// Australian dialect reference set (ADRS) - 32570271000036106.
///
/// Supplies the en-AU acceptability of each description.
pub const AUSTRALIAN_DIALECT_REFSET: SctId = 32570271000036106;

