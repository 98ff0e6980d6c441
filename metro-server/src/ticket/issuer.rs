//! Ticket issuance.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use uuid::Uuid;

use crate::domain::{Route, StationId};

use super::token::{TicketClaims, TicketError};

/// Default validity window for a freshly issued ticket.
pub const DEFAULT_VALIDITY_MINS: i64 = 60;

/// Longest accepted validity window: one leap year.
pub const MAX_VALIDITY_MINS: i64 = 366 * 24 * 60;

/// Configuration for the ticket issuer.
#[derive(Debug, Clone)]
pub struct IssuerConfig {
    /// How long a ticket stays valid after issuance (minutes).
    pub validity_mins: i64,
}

impl IssuerConfig {
    pub fn new(validity_mins: i64) -> Self {
        Self { validity_mins }
    }

    /// Returns the validity window as a Duration, clamped to
    /// `0..=MAX_VALIDITY_MINS`.
    pub fn validity(&self) -> Duration {
        let mins = self.validity_mins.clamp(0, MAX_VALIDITY_MINS);
        Duration::try_minutes(mins).unwrap_or(Duration::MAX)
    }
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            validity_mins: DEFAULT_VALIDITY_MINS,
        }
    }
}

/// An issued ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Booking reference, unique per ticket.
    pub booking_id: Uuid,
    /// Encoded token, suitable for a QR payload.
    pub token: String,
    pub source: StationId,
    pub destination: StationId,
    pub issued_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

impl Ticket {
    /// Check whether the ticket may be used at `now`.
    ///
    /// Valid from issuance (inclusive) until the end of the window
    /// (exclusive).
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.issued_at <= now && now < self.valid_until
    }
}

/// End of the window opened at `start`, saturating at the latest
/// representable instant.
fn window_end(start: DateTime<Utc>, validity: Duration) -> DateTime<Utc> {
    start
        .checked_add_signed(validity)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Mints tickets for planned routes.
///
/// Holds no mutable state; randomness comes from the operating system's
/// generator through `Uuid::new_v4`, which is safe to call from any number
/// of threads at once.
#[derive(Debug, Clone, Default)]
pub struct TicketIssuer {
    config: IssuerConfig,
}

impl TicketIssuer {
    pub fn new(config: IssuerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IssuerConfig {
        &self.config
    }

    /// Issue a ticket for `route`, stamped with the current time.
    pub fn issue(&self, route: &Route) -> Ticket {
        self.issue_at(route, Utc::now())
    }

    /// Issue a ticket for `route`, stamped with `now`.
    ///
    /// The issuance time is truncated to whole seconds so that it matches
    /// what the token carries.
    pub fn issue_at(&self, route: &Route, now: DateTime<Utc>) -> Ticket {
        let issued_at = now.trunc_subsecs(0);
        let claims = TicketClaims {
            source: route.source().clone(),
            destination: route.destination().clone(),
            issued_at,
            nonce: Uuid::new_v4(),
        };

        Ticket {
            booking_id: Uuid::new_v4(),
            token: claims.encode(),
            valid_until: window_end(issued_at, self.config.validity()),
            source: claims.source,
            destination: claims.destination,
            issued_at,
        }
    }

    /// Decode a token and check it against the validity window at `now`.
    ///
    /// This is the check a gate would run; the issuer itself never
    /// rejects a ticket it has minted.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TicketClaims, TicketError> {
        let claims = TicketClaims::decode(token)?;
        if now < claims.issued_at {
            return Err(TicketError::NotYetValid(claims.issued_at));
        }
        let valid_until = window_end(claims.issued_at, self.config.validity());
        if now >= valid_until {
            return Err(TicketError::Expired(valid_until));
        }
        Ok(claims)
    }
}
