//! Ticket token encoding.
//!
//! A token is the URL-safe base64 (no padding) encoding of
//!
//! ```text
//! METRO:<source>:<destination>:<issued-at unix seconds>:<nonce>
//! ```
//!
//! where the nonce is the 32 lowercase hex digits of a random v4 UUID.
//! Station identifiers never contain `:`, so the payload splits
//! unambiguously, and the encoded form is printable and safe to embed in
//! a QR code.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{MAX_ID_LEN, StationId};

const PREFIX: &str = "METRO";

/// Upper bound on the length of an encoded token.
///
/// Payload is at most `5 + 1 + 32 + 1 + 32 + 1 + 20 + 1 + 32` bytes.
pub const MAX_TOKEN_LEN: usize = (PREFIX.len() + 2 * MAX_ID_LEN + 20 + 32 + 4).div_ceil(3) * 4;

/// Errors from decoding or checking a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    /// Not valid URL-safe base64 or not UTF-8
    #[error("ticket token is not valid base64 text")]
    Encoding,

    /// Decoded but the payload isn't in the expected shape
    #[error("malformed ticket token: {0}")]
    Malformed(&'static str),

    /// The ticket is outside its validity window
    #[error("ticket expired at {0}")]
    Expired(DateTime<Utc>),

    /// The ticket's issuance time is in the future
    #[error("ticket not valid until {0}")]
    NotYetValid(DateTime<Utc>),
}

/// The fields carried inside a ticket token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketClaims {
    pub source: StationId,
    pub destination: StationId,
    pub issued_at: DateTime<Utc>,
    pub nonce: Uuid,
}

impl TicketClaims {
    /// Encode the claims as a token string.
    pub fn encode(&self) -> String {
        let payload = format!(
            "{PREFIX}:{}:{}:{}:{}",
            self.source,
            self.destination,
            self.issued_at.timestamp(),
            self.nonce.simple()
        );
        URL_SAFE_NO_PAD.encode(payload)
    }

    /// Decode a token string back into its claims.
    pub fn decode(token: &str) -> Result<Self, TicketError> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(TicketError::Malformed("token too long"));
        }
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| TicketError::Encoding)?;
        let payload = String::from_utf8(bytes).map_err(|_| TicketError::Encoding)?;

        let mut parts = payload.split(':');
        if parts.next() != Some(PREFIX) {
            return Err(TicketError::Malformed("missing METRO prefix"));
        }
        let (Some(source), Some(destination), Some(issued), Some(nonce), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(TicketError::Malformed("wrong number of fields"));
        };

        let source =
            StationId::parse(source).map_err(|_| TicketError::Malformed("bad source station"))?;
        let destination = StationId::parse(destination)
            .map_err(|_| TicketError::Malformed("bad destination station"))?;
        let issued_at = issued
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or(TicketError::Malformed("bad issuance time"))?;
        if nonce.len() != 32 {
            return Err(TicketError::Malformed("bad nonce"));
        }
        let nonce = Uuid::try_parse(nonce).map_err(|_| TicketError::Malformed("bad nonce"))?;

        Ok(Self {
            source,
            destination,
            issued_at,
            nonce,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn claims() -> TicketClaims {
        TicketClaims {
            source: sid("S1"),
            destination: sid("S5"),
            issued_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            nonce: Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap(),
        }
    }

    #[test]
    fn payload_layout() {
        let token = claims().encode();
        let payload = String::from_utf8(URL_SAFE_NO_PAD.decode(&token).unwrap()).unwrap();
        assert_eq!(
            payload,
            "METRO:S1:S5:1700000000:67e5504410b1426f9247bb680e5fe0c8"
        );
    }

    #[test]
    fn decode_recovers_claims() {
        let original = claims();
        let decoded = TicketClaims::decode(&original.encode()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn token_is_url_safe_and_bounded() {
        let long = "X".repeat(MAX_ID_LEN);
        let claims = TicketClaims {
            source: sid(&long),
            destination: sid(&long),
            issued_at: DateTime::from_timestamp(i64::from(i32::MAX) * 4, 0).unwrap(),
            nonce: Uuid::new_v4(),
        };
        let token = claims.encode();
        assert!(token.len() <= MAX_TOKEN_LEN);
        assert!(
            token
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            TicketClaims::decode("not base64!"),
            Err(TicketError::Encoding)
        );

        let wrong_prefix = URL_SAFE_NO_PAD.encode("BUS:S1:S5:0:67e5504410b1426f9247bb680e5fe0c8");
        assert!(matches!(
            TicketClaims::decode(&wrong_prefix),
            Err(TicketError::Malformed(_))
        ));

        let extra_field =
            URL_SAFE_NO_PAD.encode("METRO:S1:S5:0:67e5504410b1426f9247bb680e5fe0c8:x");
        assert!(matches!(
            TicketClaims::decode(&extra_field),
            Err(TicketError::Malformed(_))
        ));

        let bad_time = URL_SAFE_NO_PAD.encode("METRO:S1:S5:soon:67e5504410b1426f9247bb680e5fe0c8");
        assert_eq!(
            TicketClaims::decode(&bad_time),
            Err(TicketError::Malformed("bad issuance time"))
        );

        let short_nonce = URL_SAFE_NO_PAD.encode("METRO:S1:S5:0:abc");
        assert_eq!(
            TicketClaims::decode(&short_nonce),
            Err(TicketError::Malformed("bad nonce"))
        );
    }

    #[test]
    fn rejects_overlong_token() {
        let token = "A".repeat(MAX_TOKEN_LEN + 1);
        assert!(matches!(
            TicketClaims::decode(&token),
            Err(TicketError::Malformed(_))
        ));
    }
}
