//! Seat-state derivation.
//!
//! The seat map is never stored: it is recomputed on every render by folding
//! the current ticket set onto a synthetic grid of `seat_count` seats, four
//! per row. A seat's status comes from the ticket claiming its number, with
//! leading zeros stripped before comparison.

use serde::{Deserialize, Serialize};

use crate::routes::RouteSheet;
use crate::tickets::Ticket;

/// Seats per row on the grid (two each side of the aisle).
pub const SEATS_PER_ROW: u32 = 4;

/// Occupancy status of a single seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// No ticket claims this seat.
    Available,

    /// A ticket claims this seat but the passenger has not boarded.
    NotBoarded,

    /// A ticket claims this seat and the passenger has boarded.
    Boarded,
}

/// One derived seat. Recomputed on every render, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Seat id, unique across the whole bus (floor 2 continues floor 1's
    /// numbering).
    pub id: u32,

    /// Occupancy derived from the ticket set.
    pub status: SeatStatus,

    /// 1-based row within the floor.
    pub row: u32,

    /// 1-based column within the row.
    pub column: u32,

    /// Floor this seat is on (1 or 2).
    pub floor: u8,
}

/// Derive the full seat layout for one floor.
///
/// Pure and deterministic: identical inputs always produce the identical
/// layout, exactly `seat_count` seats in ascending id order. A ticket matches
/// a seat when its seat number, parsed numerically (so `"007"` matches seat
/// 7), equals the seat id; the first matching ticket wins if the uniqueness
/// invariant is ever violated upstream. Tickets with non-numeric seat numbers
/// match nothing.
#[must_use]
pub fn derive_seats(
    seat_count: u32,
    floor: u8,
    seat_id_offset: u32,
    tickets: &[Ticket],
) -> Vec<Seat> {
    let mut seats = Vec::with_capacity(seat_count as usize);
    for i in 0..seat_count {
        let id = seat_id_offset + i + 1;
        let status = match tickets.iter().find(|t| t.numeric_seat() == Some(id)) {
            Some(ticket) if ticket.boarded => SeatStatus::Boarded,
            Some(_) => SeatStatus::NotBoarded,
            None => SeatStatus::Available,
        };
        seats.push(Seat {
            id,
            status,
            row: i / SEATS_PER_ROW + 1,
            column: i % SEATS_PER_ROW + 1,
            floor,
        });
    }
    seats
}

/// Derive the layout for one floor of a route sheet.
///
/// Floor 1 starts at seat 1; floor 2 starts at `seat_count_floor1 + 1`.
/// Floors with no seats (single-deckers asked for floor 2) yield an empty
/// layout.
#[must_use]
pub fn derive_floor(sheet: &RouteSheet, floor: u8, tickets: &[Ticket]) -> Vec<Seat> {
    derive_seats(
        sheet.seat_count_for(floor),
        floor,
        sheet.seat_offset_for(floor),
        tickets,
    )
}
