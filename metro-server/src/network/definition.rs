//! JSON network definitions and a builder for them.
//!
//! A definition lists stations, lines (ordered stop lists expanded into
//! bidirectional segments) and optional explicit segments:
//!
//! ```json
//! {
//!   "stations": [{ "id": "S1", "name": "Station A" }],
//!   "lines": [{ "id": "R1", "name": "Red Line", "stops": ["S1", "S2"], "travelTimeMins": 5 }],
//!   "segments": [{ "from": "S2", "to": "S7", "line": "X", "travelTimeMins": 3, "bidirectional": false }]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{Line, LineId, Station, StationId};

use super::{ConfigError, MAX_TRAVEL_TIME_MINS, Network, Segment};

/// Default minutes between consecutive stops on a line.
pub const DEFAULT_HOP_MINS: i64 = 5;

fn default_hop_mins() -> i64 {
    DEFAULT_HOP_MINS
}

fn default_bidirectional() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationDef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LineDef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub stops: Vec<String>,
    #[serde(default = "default_hop_mins")]
    pub travel_time_mins: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SegmentDef {
    pub from: String,
    pub to: String,
    pub line: String,
    pub travel_time_mins: i64,
    #[serde(default = "default_bidirectional")]
    pub bidirectional: bool,
}

/// A network as written in a definition file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkDefinition {
    #[serde(default)]
    pub stations: Vec<StationDef>,
    #[serde(default)]
    pub lines: Vec<LineDef>,
    #[serde(default)]
    pub segments: Vec<SegmentDef>,
}

/// Convert a raw minute count, rejecting zero, negatives and anything
/// above [`MAX_TRAVEL_TIME_MINS`].
fn travel_time(from: &StationId, to: &StationId, mins: i64) -> Result<u32, ConfigError> {
    if mins <= 0 {
        return Err(ConfigError::NonPositiveTravelTime {
            from: from.clone(),
            to: to.clone(),
            mins,
        });
    }
    match u32::try_from(mins) {
        Ok(m) if m <= MAX_TRAVEL_TIME_MINS => Ok(m),
        _ => Err(ConfigError::TravelTimeTooLong {
            from: from.clone(),
            to: to.clone(),
            mins,
            max: MAX_TRAVEL_TIME_MINS,
        }),
    }
}

impl NetworkDefinition {
    /// Parse a definition from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate the definition and build the network.
    pub fn into_network(self) -> Result<Network, ConfigError> {
        let stations = self
            .stations
            .into_iter()
            .map(|s| Ok(Station::new(StationId::parse(&s.id)?, s.name)))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let mut lines = Vec::with_capacity(self.lines.len());
        let mut segments = Vec::new();

        for def in self.lines {
            let id = LineId::parse(&def.id)?;
            if def.stops.len() < 2 {
                return Err(ConfigError::ShortLine(id));
            }
            let stops = def
                .stops
                .iter()
                .map(|s| StationId::parse(s))
                .collect::<Result<Vec<_>, _>>()?;
            for pair in stops.windows(2) {
                let mins = travel_time(&pair[0], &pair[1], def.travel_time_mins)?;
                segments.extend(Segment::both_ways(
                    pair[0].clone(),
                    pair[1].clone(),
                    id.clone(),
                    mins,
                ));
            }
            let name = def.name.unwrap_or_else(|| def.id.clone());
            lines.push(Line::new(id, name));
        }

        for def in self.segments {
            let from = StationId::parse(&def.from)?;
            let to = StationId::parse(&def.to)?;
            let line = LineId::parse(&def.line)?;
            let mins = travel_time(&from, &to, def.travel_time_mins)?;
            if def.bidirectional {
                segments.extend(Segment::both_ways(from, to, line, mins));
            } else {
                segments.push(Segment::new(from, to, line, mins));
            }
        }

        Network::load_with_lines(stations, lines, segments)
    }
}

impl Network {
    /// Load a network from a JSON definition string.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        NetworkDefinition::from_json(text)?.into_network()
    }

    /// Load a network from a JSON definition file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading network definition");
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// Builder for network definitions.
///
/// Provides a fluent API for declaring stations and lines; identifiers are
/// validated when [`NetworkBuilder::build`] runs.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    inner: NetworkDefinition,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station.
    pub fn station(mut self, id: &str, name: &str) -> Self {
        self.inner.stations.push(StationDef {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    /// Add a line running through `stops` in order, with a fixed time per hop.
    pub fn line(mut self, id: &str, name: &str, stops: &[&str], hop_mins: i64) -> Self {
        self.inner.lines.push(LineDef {
            id: id.to_string(),
            name: Some(name.to_string()),
            stops: stops.iter().map(|s| s.to_string()).collect(),
            travel_time_mins: hop_mins,
        });
        self
    }

    /// Add a bidirectional link between two stations.
    pub fn link(mut self, from: &str, to: &str, line: &str, mins: i64) -> Self {
        self.inner.segments.push(SegmentDef {
            from: from.to_string(),
            to: to.to_string(),
            line: line.to_string(),
            travel_time_mins: mins,
            bidirectional: true,
        });
        self
    }

    /// Add a one-way segment.
    pub fn one_way(mut self, from: &str, to: &str, line: &str, mins: i64) -> Self {
        self.inner.segments.push(SegmentDef {
            from: from.to_string(),
            to: to.to_string(),
            line: line.to_string(),
            travel_time_mins: mins,
            bidirectional: false,
        });
        self
    }

    pub fn build(self) -> Result<Network, ConfigError> {
        self.inner.into_network()
    }
}

/// The demo network served when no definition file is configured.
///
/// Red Line runs S1–S2–S3–S4 and Blue Line runs S5–S3, so S3 is the only
/// interchange. Every hop takes 5 minutes.
pub fn demo_network() -> Result<Network, ConfigError> {
    NetworkBuilder::new()
        .station("S1", "Station A")
        .station("S2", "Station B")
        .station("S3", "Station C (Interchange)")
        .station("S4", "Station D")
        .station("S5", "Station E")
        .line("R1", "Red Line", &["S1", "S2", "S3", "S4"], DEFAULT_HOP_MINS)
        .line("R2", "Blue Line", &["S5", "S3"], DEFAULT_HOP_MINS)
        .build()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn sid(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    const SAMPLE: &str = r#"{
        "stations": [
            { "id": "A", "name": "Alpha" },
            { "id": "B", "name": "Bravo" },
            { "id": "C", "name": "Charlie" }
        ],
        "lines": [
            { "id": "G", "name": "Green", "stops": ["A", "B"], "travelTimeMins": 7 }
        ],
        "segments": [
            { "from": "B", "to": "C", "line": "Y", "travelTimeMins": 2, "bidirectional": false }
        ]
    }"#;

    #[test]
    fn parses_sample_definition() {
        let network = Network::from_json(SAMPLE).unwrap();

        assert_eq!(network.station_count(), 3);
        // A<->B both ways plus B->C one way
        assert_eq!(network.segment_count(), 3);
        assert_eq!(network.neighbors(&sid("A"))[0].travel_time_mins, 7);
        assert!(network.neighbors(&sid("C")).is_empty());

        let names: Vec<_> = network.lines().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Green", "Y"]);
    }

    #[test]
    fn line_hop_defaults_to_five_minutes() {
        let json = r#"{
            "stations": [{ "id": "A", "name": "Alpha" }, { "id": "B", "name": "Bravo" }],
            "lines": [{ "id": "G", "stops": ["A", "B"] }]
        }"#;
        let network = Network::from_json(json).unwrap();
        assert_eq!(network.neighbors(&sid("B"))[0].travel_time_mins, 5);
        assert_eq!(network.lines().next().unwrap().name, "G");
    }

    #[test]
    fn negative_travel_time_rejected() {
        let err = NetworkBuilder::new()
            .station("A", "Alpha")
            .station("B", "Bravo")
            .link("A", "B", "L", -3)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveTravelTime { mins: -3, .. }));
    }

    #[test]
    fn overlong_travel_time_rejected() {
        let huge = i64::from(u32::MAX) - 1;
        let err = NetworkBuilder::new()
            .station("A", "Alpha")
            .station("B", "Bravo")
            .station("C", "Charlie")
            .link("A", "B", "L", huge)
            .link("B", "C", "L", huge)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::TravelTimeTooLong { mins, .. } if mins == huge));

        let err = NetworkBuilder::new()
            .station("A", "Alpha")
            .station("B", "Bravo")
            .line("L", "Line", &["A", "B"], i64::MAX)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::TravelTimeTooLong { .. }));
    }

    #[test]
    fn short_line_rejected() {
        let err = NetworkBuilder::new()
            .station("A", "Alpha")
            .line("L", "Lonely", &["A"], 5)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ShortLine(_)));
    }

    #[test]
    fn malformed_ids_rejected() {
        let err = NetworkBuilder::new()
            .station("A B", "Alpha")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStationId(_)));

        let err = NetworkBuilder::new()
            .station("A", "Alpha")
            .station("B", "Bravo")
            .link("A", "B", "bad line", 1)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLineId(_)));
    }

    #[test]
    fn unknown_fields_rejected() {
        let err = Network::from_json(r#"{ "stations": [], "depots": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn line_through_unknown_station_rejected() {
        let err = NetworkBuilder::new()
            .station("A", "Alpha")
            .line("L", "Line", &["A", "Z"], 5)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStation { station, .. } if station == sid("Z")));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let network = Network::from_file(file.path()).unwrap();
        assert_eq!(network.station_count(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Network::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn bundled_sample_loads() {
        let network = Network::from_json(include_str!("../../networks/sample.json")).unwrap();

        assert_eq!(network.station_count(), 7);
        assert_eq!(network.segment_count(), 13);

        let interchanges: Vec<_> = network
            .stations()
            .filter(|s| s.is_interchange())
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(interchanges, vec!["AIR", "CEN", "STD", "UNI"]);
    }

    #[test]
    fn demo_network_shape() {
        let network = demo_network().unwrap();
        assert_eq!(network.station_count(), 5);
        // 3 Red hops + 1 Blue hop, each both ways
        assert_eq!(network.segment_count(), 8);

        let interchanges: Vec<_> = network
            .stations()
            .filter(|s| s.is_interchange())
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(interchanges, vec!["S3"]);
    }
}
