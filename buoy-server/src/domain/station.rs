//! Station identifier type.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station: {reason}")]
pub struct InvalidStation {
    reason: &'static str,
}

/// An NDBC station identifier (e.g. `41009`, `SJSN4`).
///
/// The identifier is stored trimmed and with its original case, which is what
/// gets displayed and embedded in the report URL. Equality and hashing ignore
/// ASCII case, so `sjsn4` and `SJSN4` name the same station.
///
/// # Examples
///
/// ```
/// use buoy_server::domain::StationId;
///
/// let id = StationId::parse("  sjsn4 ").unwrap();
/// assert_eq!(id.as_str(), "sjsn4");
/// assert_eq!(id, StationId::parse("SJSN4").unwrap());
///
/// assert!(StationId::parse("   ").is_err());
///
/// // Only letters and digits can appear in the report path
/// assert!(StationId::parse("a/../b").is_err());
/// ```
#[derive(Clone)]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier, trimming surrounding whitespace.
    ///
    /// What remains must be non-empty ASCII letters and digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStation> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStation {
                reason: "identifier must not be empty",
            });
        }

        if !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidStation {
                reason: "identifier must be ASCII letters and digits",
            });
        }

        Ok(StationId(trimmed.to_string()))
    }

    /// Returns the identifier as typed (trimmed, case preserved).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the case-folded identity key.
    pub fn key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl PartialEq for StationId {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for StationId {}

impl Hash for StationId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Surrounding whitespace never changes the identity.
        #[test]
        fn whitespace_is_ignored(s in "[A-Za-z0-9]{1,8}", pad in "[ \t]{0,3}") {
            let padded = format!("{pad}{s}{pad}");
            let id = StationId::parse(&padded).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        /// Case variants are the same station.
        #[test]
        fn case_insensitive_identity(s in "[A-Za-z0-9]{1,8}") {
            let lower = StationId::parse(&s.to_lowercase()).unwrap();
            let upper = StationId::parse(&s.to_uppercase()).unwrap();
            prop_assert_eq!(lower, upper);
        }

        /// Any character outside letters and digits is rejected.
        #[test]
        fn non_alphanumeric_rejected(
            prefix in "[A-Za-z0-9]{0,4}",
            bad in "[^A-Za-z0-9 \t\r\n]",
            suffix in "[A-Za-z0-9]{0,4}",
        ) {
            let raw = format!("{prefix}{bad}{suffix}");
            prop_assert!(StationId::parse(&raw).is_err());
        }

        /// Whitespace-only input is always rejected.
        #[test]
        fn blank_rejected(s in "[ \t\r\n]{0,6}") {
            prop_assert!(StationId::parse(&s).is_err());
        }
    }
}
