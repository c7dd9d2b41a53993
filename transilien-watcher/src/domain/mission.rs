//! Mission code type.

use std::fmt;

/// Maximum length of a mission code.
const MAX_LEN: usize = 8;

/// Error returned when parsing an invalid mission code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid mission code: {reason}")]
pub struct InvalidMission {
    reason: &'static str,
}

/// A validated mission code.
///
/// Transilien identifies each scheduled run with a short code, usually four
/// uppercase letters (e.g. "DACA", "FACA"). The first letter encodes the
/// terminus and the rest the stopping pattern. Feeds occasionally mix in
/// digits, so any ASCII alphanumeric code of up to 8 characters is accepted.
///
/// # Examples
///
/// ```
/// use transilien_watcher::domain::Mission;
///
/// let m = Mission::parse("DACA").unwrap();
/// assert_eq!(m.as_str(), "DACA");
///
/// // Surrounding whitespace is ignored
/// assert_eq!(Mission::parse(" FACA\n").unwrap().as_str(), "FACA");
///
/// assert!(Mission::parse("").is_err());
/// assert!(Mission::parse("DA-CA").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Mission(String);

impl Mission {
    /// Parse a mission code, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidMission> {
        let s = s.trim();

        if s.is_empty() {
            return Err(InvalidMission {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_LEN {
            return Err(InvalidMission {
                reason: "must be at most 8 characters",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidMission {
                reason: "must be ASCII letters or digits",
            });
        }

        Ok(Mission(s.to_string()))
    }

    /// Returns the mission code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mission({})", self.as_str())
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in "[A-Z0-9]{1,8}") {
            let m = Mission::parse(&s).unwrap();
            prop_assert_eq!(m.as_str(), s.as_str());
        }

        /// Codes longer than 8 characters are rejected
        #[test]
        fn too_long_rejected(s in "[A-Z]{9,16}") {
            prop_assert!(Mission::parse(&s).is_err());
        }
    }
}
