//! Web layer for the metro booking service.
//!
//! A thin HTTP adapter over [`crate::booking::BookingService`]: station
//! catalog and booking endpoints with JSON bodies.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
