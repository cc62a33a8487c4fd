//! SNOMED CT enumeration types.
//!
//! This module provides the acceptability of a description within a dialect,
//! as carried by the attribute value of a language reference set member.

use std::fmt;

use crate::{well_known, SctId};

/// Acceptability of a description in the Australian dialect.
///
/// Resolution from an attribute value is total: any code that is not one of
/// the recognized acceptability concepts, including a missing code, resolves
/// to [`Acceptability::None`].
///
/// # Examples
///
/// ```
/// use snomed_types::Acceptability;
///
/// assert_eq!(Acceptability::from_id(900000000000548007), Acceptability::Preferred);
/// assert_eq!(Acceptability::from_id(900000000000549004), Acceptability::Acceptable);
/// assert_eq!(Acceptability::from_id(42), Acceptability::None);
/// assert_eq!(Acceptability::resolve(None), Acceptability::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Acceptability {
    /// No acceptability recorded for the dialect.
    #[default]
    None,
    /// Acceptable, but not preferred.
    Acceptable,
    /// The preferred term.
    Preferred,
}

impl Acceptability {
    /// SCTID for preferred acceptability.
    pub const PREFERRED_ID: SctId = well_known::PREFERRED;
    /// SCTID for acceptable acceptability.
    pub const ACCEPTABLE_ID: SctId = well_known::ACCEPTABLE;
    /// Explicit "no acceptability" code.
    pub const NONE_ID: SctId = well_known::NO_ACCEPTABILITY;

    /// Creates an Acceptability from an attribute value.
    pub fn from_id(id: SctId) -> Self {
        match id {
            Self::PREFERRED_ID => Self::Preferred,
            Self::ACCEPTABLE_ID => Self::Acceptable,
            _ => Self::None,
        }
    }

    /// Resolves an optional attribute value; a missing value is `None`.
    pub fn resolve(id: Option<SctId>) -> Self {
        id.map_or(Self::None, Self::from_id)
    }

    /// Returns the attribute value for this acceptability.
    pub fn to_id(self) -> SctId {
        match self {
            Self::None => Self::NONE_ID,
            Self::Acceptable => Self::ACCEPTABLE_ID,
            Self::Preferred => Self::PREFERRED_ID,
        }
    }

    /// Returns true unless this is [`Acceptability::None`].
    pub fn is_ranked(self) -> bool {
        self != Self::None
    }
}

impl fmt::Display for Acceptability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "NONE",
            Self::Acceptable => "ACCEPTABLE",
            Self::Preferred => "PREFERRED",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptability_recognized_codes() {
        assert_eq!(
            Acceptability::from_id(900000000000548007),
            Acceptability::Preferred
        );
        assert_eq!(
            Acceptability::from_id(900000000000549004),
            Acceptability::Acceptable
        );
        assert_eq!(Acceptability::from_id(0), Acceptability::None);
    }

    #[test]
    fn test_acceptability_unknown_codes_degrade() {
        assert_eq!(Acceptability::from_id(1), Acceptability::None);
        assert_eq!(Acceptability::from_id(u64::MAX), Acceptability::None);
        // Description type ids are not acceptability values
        assert_eq!(
            Acceptability::from_id(900000000000013009),
            Acceptability::None
        );
        assert_eq!(Acceptability::resolve(None), Acceptability::None);
        assert_eq!(Acceptability::default(), Acceptability::None);
    }

    #[test]
    fn test_acceptability_to_id() {
        for acceptability in [
            Acceptability::None,
            Acceptability::Acceptable,
            Acceptability::Preferred,
        ] {
            assert_eq!(Acceptability::from_id(acceptability.to_id()), acceptability);
        }
    }

    #[test]
    fn test_acceptability_display() {
        assert_eq!(Acceptability::Preferred.to_string(), "PREFERRED");
        assert_eq!(Acceptability::Acceptable.to_string(), "ACCEPTABLE");
        assert!(!Acceptability::None.is_ranked());
        assert!(Acceptability::Acceptable.is_ranked());
    }
}
