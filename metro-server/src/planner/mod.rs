//! Route planner.
//!
//! Computes the best path between two stations under a configurable
//! `(time, transfers)` ordering. The search is a Dijkstra variant whose
//! states remember the line used to arrive, so transfer counts are exact.

mod config;
mod rank;
mod search;

pub use config::{PlannerConfig, RoutePolicy, UnknownPolicy};
pub use rank::{RouteCost, compare};
pub use search::{PlanError, Planner};
