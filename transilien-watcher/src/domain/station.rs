//! Station code types.

use std::fmt;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid 8-digit UIC station code, as used by the Transilien API.
///
/// # Examples
///
/// ```
/// use transilien_watcher::domain::StationCode;
///
/// let code = StationCode::parse("87393009").unwrap();
/// assert_eq!(code.as_str(), "87393009");
///
/// // Wrong length is rejected
/// assert!(StationCode::parse("8739300").is_err());
/// // Letters are rejected
/// assert!(StationCode::parse("8739300A").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationCode([u8; 8]);

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be exactly 8 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 8 {
            return Err(InvalidStationCode {
                reason: "must be exactly 8 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(InvalidStationCode {
                reason: "must be ASCII digits 0-9",
            });
        }

        let mut code = [0u8; 8];
        code.copy_from_slice(bytes);
        Ok(StationCode(code))
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
