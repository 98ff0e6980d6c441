//! The immutable station graph.

use std::collections::{BTreeMap, HashMap, hash_map::Entry};

use crate::domain::{Line, LineId, Station, StationId};

use super::ConfigError;

/// Longest accepted travel time for one segment, in minutes.
///
/// Bounds route totals well inside `u32` for any network that fits in memory.
pub const MAX_TRAVEL_TIME_MINS: u32 = 24 * 60;

/// A directed, line-tagged edge between two stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub from: StationId,
    pub to: StationId,
    pub line: LineId,
    pub travel_time_mins: u32,
}

impl Segment {
    pub fn new(from: StationId, to: StationId, line: LineId, travel_time_mins: u32) -> Self {
        Self {
            from,
            to,
            line,
            travel_time_mins,
        }
    }

    /// Both directions of a physical link, with equal weight.
    pub fn both_ways(
        a: StationId,
        b: StationId,
        line: LineId,
        travel_time_mins: u32,
    ) -> [Segment; 2] {
        [
            Segment::new(a.clone(), b.clone(), line.clone(), travel_time_mins),
            Segment::new(b, a, line, travel_time_mins),
        ]
    }
}

/// The station network.
///
/// Built once by [`Network::load`] and never mutated afterwards, so a
/// shared `&Network` (or `Arc<Network>`) can be read from any number of
/// threads without locking.
#[derive(Debug, Clone)]
pub struct Network {
    stations: BTreeMap<StationId, Station>,
    lines: BTreeMap<LineId, Line>,
    /// Outgoing segments per station, sorted by (to, line).
    adjacency: HashMap<StationId, Vec<Segment>>,
    segment_count: usize,
}

impl Network {
    /// Build a network from stations and directed segments.
    ///
    /// Lines are named after their identifiers.
    pub fn load(stations: Vec<Station>, segments: Vec<Segment>) -> Result<Self, ConfigError> {
        Self::load_with_lines(stations, Vec::new(), segments)
    }

    /// Build a network from stations, named lines and directed segments.
    ///
    /// A segment may use a line that isn't listed in `lines`; such a line
    /// takes its identifier as its name.
    pub fn load_with_lines(
        stations: Vec<Station>,
        lines: Vec<Line>,
        segments: Vec<Segment>,
    ) -> Result<Self, ConfigError> {
        let mut station_map = BTreeMap::new();
        for mut station in stations {
            if station.name.trim().is_empty() {
                return Err(ConfigError::EmptyStationName(station.id));
            }
            station.lines.clear();
            if station_map.contains_key(&station.id) {
                return Err(ConfigError::DuplicateStation(station.id));
            }
            station_map.insert(station.id.clone(), station);
        }

        let mut line_map = BTreeMap::new();
        for line in lines {
            if line_map.contains_key(&line.id) {
                return Err(ConfigError::DuplicateLine(line.id));
            }
            line_map.insert(line.id.clone(), line);
        }

        let mut adjacency: HashMap<StationId, Vec<Segment>> = HashMap::new();
        let segment_count = segments.len();

        for segment in segments {
            if segment.from == segment.to {
                return Err(ConfigError::SelfLoop(segment.from));
            }
            if segment.travel_time_mins == 0 {
                return Err(ConfigError::NonPositiveTravelTime {
                    from: segment.from,
                    to: segment.to,
                    mins: 0,
                });
            }
            if segment.travel_time_mins > MAX_TRAVEL_TIME_MINS {
                return Err(ConfigError::TravelTimeTooLong {
                    mins: i64::from(segment.travel_time_mins),
                    from: segment.from,
                    to: segment.to,
                    max: MAX_TRAVEL_TIME_MINS,
                });
            }
            for endpoint in [&segment.from, &segment.to] {
                if !station_map.contains_key(endpoint) {
                    return Err(ConfigError::UnknownStation {
                        from: segment.from.clone(),
                        to: segment.to.clone(),
                        station: endpoint.clone(),
                    });
                }
            }

            for endpoint in [&segment.from, &segment.to] {
                if let Some(station) = station_map.get_mut(endpoint) {
                    station.lines.insert(segment.line.clone());
                }
            }
            line_map
                .entry(segment.line.clone())
                .or_insert_with(|| Line::new(segment.line.clone(), segment.line.as_str()));

            match adjacency.entry(segment.from.clone()) {
                Entry::Occupied(mut e) => e.get_mut().push(segment),
                Entry::Vacant(e) => {
                    e.insert(vec![segment]);
                }
            }
        }

        for outgoing in adjacency.values_mut() {
            outgoing.sort_by(|a, b| a.to.cmp(&b.to).then_with(|| a.line.cmp(&b.line)));
        }

        Ok(Self {
            stations: station_map,
            lines: line_map,
            adjacency,
            segment_count,
        })
    }

    /// Outgoing segments from a station, ordered by destination then line.
    ///
    /// Unknown stations and stations with no outgoing segments both yield
    /// an empty slice.
    pub fn neighbors(&self, station: &StationId) -> &[Segment] {
        self.adjacency
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check whether a station is part of the network.
    pub fn exists(&self, station: &StationId) -> bool {
        self.stations.contains_key(station)
    }

    /// Look up a station by identifier.
    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    /// All stations, ordered by identifier.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// All lines, ordered by identifier.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of directed segments.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }
}
