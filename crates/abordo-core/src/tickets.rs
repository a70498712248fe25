//! Tickets, the boarding manifest, and QR payload parsing.
//!
//! A ticket ("boleto") is one passenger's paid seat reservation on a route
//! sheet. The driver's client holds the tickets for one sheet in a
//! [`Manifest`] and removes each ticket exactly once when the server confirms
//! boarding, so the passenger list and seat map update without a refetch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One passenger's paid seat reservation on a route sheet.
///
/// `seat_number` is kept as a string because the issuing system pads it with
/// leading zeros (`"007"`). Matching against a seat grid always goes through
/// [`Ticket::numeric_seat`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Server-assigned ticket id.
    pub id: i64,

    /// Passenger's full name.
    pub passenger_name: String,

    /// Passenger's national identity number.
    pub national_id: String,

    /// Seat number as issued, possibly with leading zeros.
    pub seat_number: String,

    /// Fare before discount.
    pub fare_gross: f64,

    /// Discount applied to the fare.
    pub discount: f64,

    /// Fare actually paid.
    pub fare_net: f64,

    /// Whether the passenger has been validated as physically boarded.
    pub boarded: bool,
}

impl Ticket {
    /// The seat number as a numeric id, with leading zeros stripped.
    ///
    /// Returns `None` for non-numeric seat numbers; such tickets never match
    /// a seat on any floor. That mirrors the issuing system's behavior and
    /// must not become an error here.
    #[must_use]
    pub fn numeric_seat(&self) -> Option<u32> {
        self.seat_number.trim().parse().ok()
    }
}

/// The in-memory ticket set for one route sheet.
///
/// Owned by the screen that fetched it; never shared between in-flight
/// operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    tickets: Vec<Ticket>,
}

impl Manifest {
    /// Wrap a fetched ticket set.
    #[must_use]
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self { tickets }
    }

    /// Number of tickets currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Whether the manifest holds no tickets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// The tickets in fetch order.
    #[must_use]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Find a ticket by its server-assigned id.
    #[must_use]
    pub fn find(&self, ticket_id: i64) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == ticket_id)
    }

    /// Remove and return the ticket with the given id.
    ///
    /// Called after the server confirms boarding. Removal happens at most
    /// once: a second call with the same id returns `None`, and the caller
    /// reports the id as not found.
    pub fn take(&mut self, ticket_id: i64) -> Option<Ticket> {
        let index = self.tickets.iter().position(|t| t.id == ticket_id)?;
        Some(self.tickets.remove(index))
    }
}

impl From<Vec<Ticket>> for Manifest {
    fn from(tickets: Vec<Ticket>) -> Self {
        Self::new(tickets)
    }
}

/// Failure to extract a ticket id from a scanned QR payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// The decoded text is not valid JSON.
    #[error("QR payload is not valid JSON")]
    NotJson,

    /// The payload parsed but carries no recognizable ticket id.
    #[error("QR payload does not carry a ticket id")]
    MissingTicketId,
}

/// Keys under which ticket issuance places the ticket id, in match order.
const TICKET_ID_KEYS: [&str; 3] = ["idBoleto", "id", "boletoId"];

/// Extract the ticket id from a decoded QR payload.
///
/// The issuance system emits a JSON object carrying the id under one of
/// `idBoleto`, `id`, or `boletoId`. Ids arrive as numbers or as numeric
/// strings depending on the printer batch, so both are accepted. Any other
/// shape is unrecognized input.
///
/// # Errors
///
/// Returns [`QrError::NotJson`] for undecodable text and
/// [`QrError::MissingTicketId`] for JSON without a usable id.
pub fn parse_qr_payload(raw: &str) -> Result<i64, QrError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(|_| QrError::NotJson)?;

    let object = value.as_object().ok_or(QrError::MissingTicketId)?;

    for key in TICKET_ID_KEYS {
        let Some(candidate) = object.get(key) else {
            continue;
        };
        let id = match candidate {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        if let Some(id) = id {
            return Ok(id);
        }
    }

    Err(QrError::MissingTicketId)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: i64, seat: &str, boarded: bool) -> Ticket {
        Ticket {
            id,
            passenger_name: format!("Passenger {id}"),
            national_id: "1805548996".into(),
            seat_number: seat.into(),
            fare_gross: 12.5,
            discount: 0.0,
            fare_net: 12.5,
            boarded,
        }
    }

    #[test]
    fn test_numeric_seat_strips_leading_zeros() {
        assert_eq!(ticket(1, "007", false).numeric_seat(), Some(7));
        assert_eq!(ticket(2, "12", false).numeric_seat(), Some(12));
        assert_eq!(ticket(3, " 3 ", false).numeric_seat(), Some(3));
    }

    #[test]
    fn test_numeric_seat_rejects_non_numeric() {
        assert_eq!(ticket(1, "A4", false).numeric_seat(), None);
        assert_eq!(ticket(2, "", false).numeric_seat(), None);
        assert_eq!(ticket(3, "-1", false).numeric_seat(), None);
    }

    #[test]
    fn test_manifest_find() {
        let manifest = Manifest::new(vec![ticket(10, "1", false), ticket(11, "2", true)]);
        assert_eq!(manifest.find(11).map(|t| t.boarded), Some(true));
        assert!(manifest.find(99).is_none());
    }

    #[test]
    fn test_manifest_take_removes_exactly_once() {
        let mut manifest = Manifest::new(vec![ticket(10, "1", false), ticket(11, "2", false)]);

        let taken = manifest.take(10);
        assert_eq!(taken.map(|t| t.id), Some(10));
        assert_eq!(manifest.len(), 1);

        // Second attempt on the same id finds no match.
        assert!(manifest.take(10).is_none());
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn test_manifest_take_unknown_id_leaves_set_unchanged() {
        let mut manifest = Manifest::new(vec![ticket(10, "1", false)]);
        assert!(manifest.take(42).is_none());
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn test_qr_accepts_each_key_spelling() {
        assert_eq!(parse_qr_payload(r#"{"idBoleto": 42}"#), Ok(42));
        assert_eq!(parse_qr_payload(r#"{"id": 7}"#), Ok(7));
        assert_eq!(parse_qr_payload(r#"{"boletoId": 1001}"#), Ok(1001));
    }

    #[test]
    fn test_qr_accepts_numeric_string_ids() {
        assert_eq!(parse_qr_payload(r#"{"idBoleto": "42"}"#), Ok(42));
        assert_eq!(parse_qr_payload(r#"{"id": " 7 "}"#), Ok(7));
    }

    #[test]
    fn test_qr_prefers_id_boleto_over_generic_id() {
        assert_eq!(parse_qr_payload(r#"{"id": 1, "idBoleto": 2}"#), Ok(2));
    }

    #[test]
    fn test_qr_rejects_non_json() {
        assert_eq!(
            parse_qr_payload("https://example.com/t/42"),
            Err(QrError::NotJson)
        );
    }

    #[test]
    fn test_qr_rejects_json_without_ticket_id() {
        assert_eq!(
            parse_qr_payload(r#"{"pasajero": "Juan"}"#),
            Err(QrError::MissingTicketId)
        );
        assert_eq!(parse_qr_payload("[1, 2]"), Err(QrError::MissingTicketId));
        assert_eq!(parse_qr_payload("42"), Err(QrError::MissingTicketId));
        assert_eq!(
            parse_qr_payload(r#"{"id": "not-a-number"}"#),
            Err(QrError::MissingTicketId)
        );
    }
}
