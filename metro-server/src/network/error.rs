//! Network configuration errors.

use crate::domain::{InvalidLineId, InvalidStationId, LineId, StationId};

/// A malformed network definition.
///
/// Raised only while loading the network; the service refuses to start
/// when it sees one.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Two stations share an identifier
    #[error("duplicate station id {0}")]
    DuplicateStation(StationId),

    /// Two lines share an identifier
    #[error("duplicate line id {0}")]
    DuplicateLine(LineId),

    /// A segment or line names a station that was never declared
    #[error("segment {from} -> {to} references unknown station {station}")]
    UnknownStation {
        from: StationId,
        to: StationId,
        station: StationId,
    },

    /// Travel time must be at least one minute
    #[error("segment {from} -> {to} has non-positive travel time {mins}")]
    NonPositiveTravelTime {
        from: StationId,
        to: StationId,
        mins: i64,
    },

    /// Travel time above the one-day cap
    #[error("segment {from} -> {to} has travel time {mins} above the {max}-minute limit")]
    TravelTimeTooLong {
        from: StationId,
        to: StationId,
        mins: i64,
        max: u32,
    },

    /// A segment starts and ends at the same station
    #[error("segment loops back to {0}")]
    SelfLoop(StationId),

    /// Station display names must not be blank
    #[error("station {0} has an empty name")]
    EmptyStationName(StationId),

    /// A line needs at least two stops
    #[error("line {0} must list at least two stops")]
    ShortLine(LineId),

    #[error(transparent)]
    InvalidStationId(#[from] InvalidStationId),

    #[error(transparent)]
    InvalidLineId(#[from] InvalidLineId),

    /// Network file could not be read
    #[error("cannot read network file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Network file is not valid JSON for the definition format
    #[error("invalid network definition: {0}")]
    Json(#[from] serde_json::Error),
}
