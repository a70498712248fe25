//! Route-sheet snapshots ("hoja de trabajo").
//!
//! A route sheet is a driver's assigned trip for the day, with origin,
//! destination, scheduled departure, and the bus's seat layout. Sheets are
//! read-only once fetched; the client never mutates them.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A driver's assigned trip for a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSheet {
    /// Server-assigned sheet id.
    pub id: i64,

    /// Route code shown to the driver (e.g. "R-014").
    pub code: String,

    /// City the trip departs from.
    pub origin_city: String,

    /// City the trip arrives at.
    pub destination_city: String,

    /// Scheduled departure time as sent by the server (e.g. "06:30").
    pub scheduled_departure: String,

    /// Bus license plate, when a bus has been assigned.
    pub bus_plate: Option<String>,

    /// Whether the bus is a double-decker.
    pub has_second_floor: bool,

    /// Seats on floor 1.
    pub seat_count_floor1: u32,

    /// Seats on floor 2, when present.
    pub seat_count_floor2: Option<u32>,
}

impl RouteSheet {
    /// Seat count for the given floor.
    ///
    /// Floor 2 of a single-decker, and any floor outside `{1, 2}`, has zero
    /// seats; callers render an empty layout rather than failing.
    #[must_use]
    pub fn seat_count_for(&self, floor: u8) -> u32 {
        match floor {
            1 => self.seat_count_floor1,
            2 if self.has_second_floor => self.seat_count_floor2.unwrap_or(0),
            _ => 0,
        }
    }

    /// Seat-id offset for the given floor.
    ///
    /// Floor 2 numbering continues from floor 1's count, so seat ids stay
    /// unique across the whole bus.
    #[must_use]
    pub const fn seat_offset_for(&self, floor: u8) -> u32 {
        match floor {
            2 => self.seat_count_floor1,
            _ => 0,
        }
    }

    /// The scheduled departure parsed as a time of day, when well-formed.
    ///
    /// The server sends either "HH:MM" or "HH:MM:SS". Used for sorting the
    /// route list; an unparseable value just sorts last.
    #[must_use]
    pub fn departure_time(&self) -> Option<NaiveTime> {
        let raw = self.scheduled_departure.trim();
        NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .ok()
    }
}

/// Find the sheet with the given id in a fetched list.
///
/// The API only exposes the full list of today's sheets, so per-sheet screens
/// filter client-side.
#[must_use]
pub fn find_sheet(sheets: &[RouteSheet], id: i64) -> Option<&RouteSheet> {
    sheets.iter().find(|sheet| sheet.id == id)
}
