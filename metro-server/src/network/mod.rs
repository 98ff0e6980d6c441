//! Station network model.
//!
//! Stations and directed, weighted, line-tagged segments, loaded once at
//! startup and read-only afterwards.

mod definition;
mod error;
mod graph;

pub use definition::{
    DEFAULT_HOP_MINS, LineDef, NetworkBuilder, NetworkDefinition, SegmentDef, StationDef,
    demo_network,
};
pub use error::ConfigError;
pub use graph::{MAX_TRAVEL_TIME_MINS, Network, Segment};
