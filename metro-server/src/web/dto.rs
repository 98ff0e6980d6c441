//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::domain::Station;

/// Request to book a trip.
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    /// Source station id
    pub source: String,

    /// Destination station id
    pub destination: String,
}

/// A successful booking.
///
/// Never carries an `error` field; failures use [`ErrorResponse`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    /// Booking reference
    pub booking_id: String,

    pub source: String,

    pub destination: String,

    /// Station ids from source to destination inclusive
    pub route_taken: Vec<String>,

    /// Sum of segment travel times
    pub total_time_mins: u32,

    /// Number of line changes
    pub transfers: u32,

    /// Ticket token for the QR code
    pub qr_string: String,

    pub issued_at: DateTime<Utc>,

    pub valid_until: DateTime<Utc>,
}

impl BookingResponse {
    /// Create from a domain Booking.
    pub fn from_booking(booking: &Booking) -> Self {
        let ticket = &booking.ticket;
        Self {
            booking_id: ticket.booking_id.to_string(),
            source: ticket.source.to_string(),
            destination: ticket.destination.to_string(),
            route_taken: booking
                .route
                .stops()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            total_time_mins: booking.route.total_time_mins(),
            transfers: booking.route.transfers(),
            qr_string: ticket.token.clone(),
            issued_at: ticket.issued_at,
            valid_until: ticket.valid_until,
        }
    }
}

/// A station in the catalog.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StationSummary {
    pub id: String,

    pub name: String,

    /// Lines serving the station
    pub lines: Vec<String>,

    /// Served by more than one line
    pub interchange: bool,
}

impl StationSummary {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.to_string(),
            name: station.name.clone(),
            lines: station.lines().map(|l| l.to_string()).collect(),
            interchange: station.is_interchange(),
        }
    }
}

/// Response for the station catalog.
#[derive(Debug, Serialize, Deserialize)]
pub struct StationListResponse {
    pub stations: Vec<StationSummary>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
