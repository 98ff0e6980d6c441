//! Booking service.
//!
//! Validates a (source, destination) request, plans a route, and issues a
//! ticket for it. Stateless across requests: the only shared data is the
//! immutable network.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::{Route, Station, StationId};
use crate::network::Network;
use crate::planner::{PlanError, Planner, PlannerConfig};
use crate::ticket::{Ticket, TicketIssuer};

/// Why a booking was refused.
///
/// Every variant is a deterministic outcome of the request; none of them
/// is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// Unknown or malformed station identifier
    #[error("Invalid source or destination station: {0}")]
    InvalidStation(String),

    /// Source equals destination
    #[error("Source and destination cannot be the same station.")]
    SameStation,

    /// No path connects the two stations
    #[error("No connecting path exists between {origin} and {destination}.")]
    NoRoute {
        origin: StationId,
        destination: StationId,
    },

    /// The planner returned an inconsistent route
    #[error("internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// Short classification for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::InvalidStation(_) => "invalid_station",
            BookingError::SameStation => "same_station",
            BookingError::NoRoute { .. } => "no_route",
            BookingError::Internal(_) => "internal",
        }
    }
}

impl From<PlanError> for BookingError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidStation(id) => BookingError::InvalidStation(id),
            PlanError::SameStation(_) => BookingError::SameStation,
            PlanError::NoRoute {
                origin,
                destination,
            } => BookingError::NoRoute {
                origin,
                destination,
            },
            PlanError::InvalidRoute(e) => BookingError::Internal(e.to_string()),
        }
    }
}

/// A successful booking: the planned route and its ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub route: Route,
    pub ticket: Ticket,
}

/// Orchestrates validation, planning and ticket issuance.
///
/// Cheap to clone; clones share the same network.
#[derive(Debug, Clone)]
pub struct BookingService {
    network: Arc<Network>,
    planner: PlannerConfig,
    issuer: TicketIssuer,
}

impl BookingService {
    pub fn new(network: Arc<Network>, planner: PlannerConfig, issuer: TicketIssuer) -> Self {
        Self {
            network,
            planner,
            issuer,
        }
    }

    /// The network this service plans over.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Station catalog, ordered by identifier.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.network.stations()
    }

    /// Book a trip, stamping the ticket with the current time.
    pub fn book(&self, source: &str, destination: &str) -> Result<Booking, BookingError> {
        self.book_at(source, destination, Utc::now())
    }

    /// Book a trip, stamping the ticket with `now`.
    pub fn book_at(
        &self,
        source: &str,
        destination: &str,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        let result = self.try_book(source, destination, now);
        match &result {
            Ok(booking) => info!(
                booking_id = %booking.ticket.booking_id,
                source,
                destination,
                time = booking.route.total_time_mins(),
                transfers = booking.route.transfers(),
                "Booking issued"
            ),
            Err(e) => warn!(
                source,
                destination,
                kind = e.kind(),
                error = %e,
                "Booking rejected"
            ),
        }
        result
    }

    fn try_book(
        &self,
        source: &str,
        destination: &str,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        // Validate
        let source = self.resolve(source)?;
        let destination = self.resolve(destination)?;
        if source == destination {
            return Err(BookingError::SameStation);
        }

        // Plan
        let route = Planner::new(&self.network, &self.planner).find_route(&source, &destination)?;

        // Issue
        let ticket = self.issuer.issue_at(&route, now);

        Ok(Booking { route, ticket })
    }

    /// Parse and look up an identifier. Malformed and unknown identifiers
    /// are reported the same way.
    fn resolve(&self, raw: &str) -> Result<StationId, BookingError> {
        StationId::parse(raw)
            .ok()
            .filter(|id| self.network.exists(id))
            .ok_or_else(|| BookingError::InvalidStation(raw.to_string()))
    }
}
