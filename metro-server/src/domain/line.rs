//! Line identifier types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::station::check_identifier;

/// Error returned when parsing an invalid line identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line id {value:?}: {reason}")]
pub struct InvalidLineId {
    value: String,
    reason: &'static str,
}

/// A validated line identifier (e.g. `R1`).
///
/// Follows the same character rules as [`super::StationId`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(String);

impl LineId {
    /// Parse a line identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidLineId> {
        check_identifier(s).map_err(|reason| InvalidLineId {
            value: s.to_string(),
            reason,
        })?;
        Ok(LineId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for LineId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LineId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        LineId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A named line in the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub id: LineId,
    pub name: String,
}

impl Line {
    pub fn new(id: LineId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
