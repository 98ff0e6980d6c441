//! Station identifier and station types.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::LineId;

/// Maximum length of a station or line identifier.
pub const MAX_ID_LEN: usize = 32;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id {value:?}: {reason}")]
pub struct InvalidStationId {
    value: String,
    reason: &'static str,
}

impl InvalidStationId {
    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Checks the shared identifier rules, returning the reason on failure.
pub(crate) fn check_identifier(s: &str) -> Result<(), &'static str> {
    if s.is_empty() {
        return Err("must not be empty");
    }
    if s.len() > MAX_ID_LEN {
        return Err("must be at most 32 characters");
    }
    if !s
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err("must contain only ASCII letters, digits, '-' or '_'");
    }
    Ok(())
}

/// A validated station identifier.
///
/// Identifiers are 1 to 32 characters drawn from ASCII letters, digits,
/// `-` and `_`. Any `StationId` value is valid by construction, which keeps
/// ticket payloads printable and bounded.
///
/// # Examples
///
/// ```
/// use metro_server::domain::StationId;
///
/// let s1 = StationId::parse("S1").unwrap();
/// assert_eq!(s1.as_str(), "S1");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("S 1").is_err());
/// assert!(StationId::parse("S1:S2").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        check_identifier(s).map_err(|reason| InvalidStationId {
            value: s.to_string(),
            reason,
        })?;
        Ok(StationId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
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

impl Serialize for StationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        StationId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A station in the network.
///
/// Line memberships are derived from the segments touching the station
/// when the network is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub(crate) lines: BTreeSet<LineId>,
}

impl Station {
    /// Create a station with no line memberships yet.
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            lines: BTreeSet::new(),
        }
    }

    /// Lines serving this station, ordered by identifier.
    pub fn lines(&self) -> impl Iterator<Item = &LineId> {
        self.lines.iter()
    }

    /// A station served by two or more lines.
    pub fn is_interchange(&self) -> bool {
        self.lines.len() >= 2
    }
}
