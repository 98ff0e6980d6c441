//! Shortest-route search.
//!
//! Dijkstra over (station, arriving line) states. Tracking the arriving
//! line makes the transfer count part of the state, so the search can
//! minimise a `(time, transfers)` pair exactly instead of approximating
//! transfers with a time penalty.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::debug;

use crate::domain::{DomainError, LineId, Route, StationId};
use crate::network::{Network, Segment};

use super::config::PlannerConfig;
use super::rank::{RouteCost, compare};

/// Error from route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Source or destination is not a known station
    #[error("Invalid source or destination station: {0}")]
    InvalidStation(String),

    /// Source and destination are the same station
    #[error("Source and destination cannot be the same station.")]
    SameStation(StationId),

    /// The two stations are in disconnected parts of the network
    #[error("No connecting path exists between {origin} and {destination}.")]
    NoRoute {
        origin: StationId,
        destination: StationId,
    },

    /// The search produced an inconsistent path
    #[error("internal planner error: {0}")]
    InvalidRoute(#[from] DomainError),
}

/// Search state: a station together with the line used to reach it.
/// The source is reached on no line.
type StateKey<'a> = (&'a StationId, Option<&'a LineId>);

/// Best known way to reach a state.
struct Label<'a> {
    cost: RouteCost,
    prev: Option<(StateKey<'a>, &'a Segment)>,
}

/// Priority-queue entry, ordered so that `BinaryHeap` pops the smallest
/// key first and, among equal keys, the entry pushed first. Neighbors are
/// expanded in station-id order, so equal-cost ties resolve towards the
/// smallest identifiers.
#[derive(Debug, PartialEq, Eq)]
struct Frontier<'a> {
    key: (u32, u32),
    seq: usize,
    cost: RouteCost,
    station: &'a StationId,
    line: Option<&'a LineId>,
}

impl Ord for Frontier<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Route planner over a shared network.
///
/// Holds only shared references; every call to [`Planner::find_route`]
/// allocates its own labels and frontier, so one planner (or many) can be
/// used from concurrent requests.
pub struct Planner<'a> {
    network: &'a Network,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a Network, config: &'a PlannerConfig) -> Self {
        Self { network, config }
    }

    /// Find the best route from `source` to `destination`.
    ///
    /// Station checks run before any search: unknown identifiers fail with
    /// [`PlanError::InvalidStation`], then identical endpoints fail with
    /// [`PlanError::SameStation`].
    pub fn find_route(
        &self,
        source: &StationId,
        destination: &StationId,
    ) -> Result<Route, PlanError> {
        let source = self.resolve(source)?;
        let destination = self.resolve(destination)?;
        if source == destination {
            return Err(PlanError::SameStation(source.clone()));
        }

        let policy = self.config.policy;
        let mut labels: HashMap<StateKey<'a>, Label<'a>> = HashMap::new();
        let mut settled: HashSet<StateKey<'a>> = HashSet::new();
        let mut frontier = BinaryHeap::new();
        let mut explored = 0usize;
        let mut seq = 0usize;

        let start = RouteCost::default();
        labels.insert(
            (source, None),
            Label {
                cost: start,
                prev: None,
            },
        );
        frontier.push(Frontier {
            key: start.key(policy),
            seq,
            cost: start,
            station: source,
            line: None,
        });

        while let Some(entry) = frontier.pop() {
            let state = (entry.station, entry.line);
            if !settled.insert(state) {
                continue;
            }
            explored += 1;

            if entry.station == destination {
                let route = build_route(&labels, state, entry.cost)?;
                debug!(
                    source = %source,
                    destination = %destination,
                    time = route.total_time_mins(),
                    transfers = route.transfers(),
                    explored,
                    "Route found"
                );
                return Ok(route);
            }

            for segment in self.network.neighbors(entry.station) {
                let next = (&segment.to, Some(&segment.line));
                if settled.contains(&next) {
                    continue;
                }

                let is_transfer = entry.line.is_some_and(|line| *line != segment.line);
                let cost = entry.cost.add_hop(segment.travel_time_mins, is_transfer);

                let improves = labels
                    .get(&next)
                    .is_none_or(|label| compare(&cost, &label.cost, policy) == Ordering::Less);
                if !improves {
                    continue;
                }

                labels.insert(
                    next,
                    Label {
                        cost,
                        prev: Some((state, segment)),
                    },
                );
                seq += 1;
                frontier.push(Frontier {
                    key: cost.key(policy),
                    seq,
                    cost,
                    station: &segment.to,
                    line: Some(&segment.line),
                });
            }
        }

        debug!(
            source = %source,
            destination = %destination,
            explored,
            "No route"
        );
        Err(PlanError::NoRoute {
            origin: source.clone(),
            destination: destination.clone(),
        })
    }

    /// Map a caller's identifier to the network's own copy.
    fn resolve(&self, id: &StationId) -> Result<&'a StationId, PlanError> {
        self.network
            .station(id)
            .map(|station| &station.id)
            .ok_or_else(|| PlanError::InvalidStation(id.to_string()))
    }
}

/// Walk predecessor links back from `end` and assemble the route.
fn build_route<'a>(
    labels: &HashMap<StateKey<'a>, Label<'a>>,
    end: StateKey<'a>,
    cost: RouteCost,
) -> Result<Route, PlanError> {
    let mut hops = Vec::new();
    let mut current = end;
    while let Some((prev, segment)) = labels.get(&current).and_then(|label| label.prev) {
        hops.push(segment);
        current = prev;
    }
    hops.reverse();

    let mut stops = Vec::with_capacity(hops.len() + 1);
    stops.push(current.0.clone());
    let mut legs = Vec::with_capacity(hops.len());
    for segment in hops {
        stops.push(segment.to.clone());
        legs.push(segment.line.clone());
    }

    let route = Route::new(stops, legs, cost.time_mins)?;
    debug_assert_eq!(route.transfers(), cost.transfers);
    Ok(route)
}
