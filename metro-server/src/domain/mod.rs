//! Domain types for the metro booking service.
//!
//! This module contains the core domain model types. All types enforce
//! their invariants at construction time, so code that receives these types
//! can trust their validity.

mod error;
mod line;
mod route;
mod station;

pub use error::DomainError;
pub use line::{InvalidLineId, Line, LineId};
pub use route::{Route, count_transfers};
pub use station::{InvalidStationId, MAX_ID_LEN, Station, StationId};
