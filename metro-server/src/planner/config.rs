//! Planner configuration.

use std::fmt;
use std::str::FromStr;

/// Which objective the planner minimises first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutePolicy {
    /// Fastest route; among equally fast routes, fewest transfers.
    #[default]
    TimeThenTransfers,

    /// Fewest transfers; among those, fastest.
    TransfersThenTime,
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route policy {0:?} (expected time-then-transfers or transfers-then-time)")]
pub struct UnknownPolicy(String);

impl FromStr for RoutePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time-then-transfers" | "time" => Ok(RoutePolicy::TimeThenTransfers),
            "transfers-then-time" | "transfers" => Ok(RoutePolicy::TransfersThenTime),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for RoutePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoutePolicy::TimeThenTransfers => "time-then-transfers",
            RoutePolicy::TransfersThenTime => "transfers-then-time",
        })
    }
}

/// Configuration parameters for route search.
#[derive(Debug, Clone, Default)]
pub struct PlannerConfig {
    /// Ordering applied to candidate routes.
    pub policy: RoutePolicy,
}

impl PlannerConfig {
    pub fn new(policy: RoutePolicy) -> Self {
        Self { policy }
    }
}
