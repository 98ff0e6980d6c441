//! Ticket issuance and token format.
//!
//! A ticket is a time-bounded, practically unguessable token bound to a
//! planned route. Tickets are not stored; anything needed to check one is
//! inside the token.

mod issuer;
mod token;

pub use issuer::{DEFAULT_VALIDITY_MINS, IssuerConfig, MAX_VALIDITY_MINS, Ticket, TicketIssuer};
pub use token::{MAX_TOKEN_LEN, TicketClaims, TicketError};
