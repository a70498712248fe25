//! Plain-text rendering for the driver screens.
//!
//! Seat maps follow the coach layout: four seats per row, two on each side
//! of the aisle. Everything returns a `String` so the handlers own the
//! single `print!` per screen and the renderers stay trivially testable.

use abordo_core::routes::RouteSheet;
use abordo_core::seats::{Seat, SeatStatus, SEATS_PER_ROW};
use abordo_core::tickets::Ticket;

/// Marker shown inside an available seat cell.
const MARK_AVAILABLE: char = ' ';
/// Marker for a reserved seat whose passenger has not boarded.
const MARK_NOT_BOARDED: char = '*';
/// Marker for a boarded seat.
const MARK_BOARDED: char = '#';

/// Render today's route sheets, one card per line.
#[must_use]
pub fn route_list(sheets: &[RouteSheet]) -> String {
    if sheets.is_empty() {
        return "No route sheets assigned for today.\n".to_string();
    }

    let mut out = String::new();
    for sheet in sheets {
        out.push_str(&format!(
            "  [{}] {}  {} -> {}  dep {}",
            sheet.id,
            sheet.code,
            sheet.origin_city,
            sheet.destination_city,
            sheet.scheduled_departure
        ));
        if let Some(plate) = &sheet.bus_plate {
            out.push_str(&format!("  bus {plate}"));
        }
        out.push('\n');
    }
    out
}

/// Render the passenger manifest as a fixed-width table.
#[must_use]
pub fn passenger_table(tickets: &[Ticket]) -> String {
    if tickets.is_empty() {
        return "No tickets sold for this route sheet.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("  seat  passenger                       C.I.         fare    boarded\n");
    for ticket in tickets {
        out.push_str(&format!(
            "  {:>4}  {:<30}  {:<11}  {:>6.2}  {}\n",
            ticket.seat_number,
            ticket.passenger_name,
            ticket.national_id,
            ticket.fare_net,
            if ticket.boarded { "yes" } else { "no" }
        ));
    }
    out
}

/// Render one floor's seat map: rows of four with the aisle gap between
/// columns 2 and 3, front of the bus at the top.
#[must_use]
pub fn seat_map(seats: &[Seat]) -> String {
    if seats.is_empty() {
        return "No seats on this floor.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("  front\n");
    for row in seats.chunks(SEATS_PER_ROW as usize) {
        out.push_str("  ");
        for (i, seat) in row.iter().enumerate() {
            if i == 2 {
                out.push_str("    ");
            } else if i > 0 {
                out.push(' ');
            }
            out.push_str(&seat_cell(seat));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "\n  [NN{MARK_AVAILABLE}] available  [NN{MARK_NOT_BOARDED}] not boarded  [NN{MARK_BOARDED}] boarded\n"
    ));
    out
}

fn seat_cell(seat: &Seat) -> String {
    let mark = match seat.status {
        SeatStatus::Available => MARK_AVAILABLE,
        SeatStatus::NotBoarded => MARK_NOT_BOARDED,
        SeatStatus::Boarded => MARK_BOARDED,
    };
    format!("[{:02}{mark}]", seat.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use abordo_core::seats::derive_seats;

    fn ticket(id: i64, seat: &str, boarded: bool) -> Ticket {
        Ticket {
            id,
            passenger_name: "Juan Mejía".into(),
            national_id: "1805548996".into(),
            seat_number: seat.into(),
            fare_gross: 12.5,
            discount: 2.5,
            fare_net: 10.0,
            boarded,
        }
    }

    fn sheet() -> RouteSheet {
        RouteSheet {
            id: 5,
            code: "R-014".into(),
            origin_city: "Ambato".into(),
            destination_city: "Quito".into(),
            scheduled_departure: "06:30".into(),
            bus_plate: Some("TBA-1234".into()),
            has_second_floor: false,
            seat_count_floor1: 8,
            seat_count_floor2: None,
        }
    }

    #[test]
    fn test_route_list_shows_card_fields() {
        let out = route_list(&[sheet()]);
        assert!(out.contains("R-014"));
        assert!(out.contains("Ambato -> Quito"));
        assert!(out.contains("dep 06:30"));
        assert!(out.contains("bus TBA-1234"));
    }

    #[test]
    fn test_route_list_empty_message() {
        assert_eq!(route_list(&[]), "No route sheets assigned for today.\n");
    }

    #[test]
    fn test_route_list_omits_missing_plate() {
        let mut s = sheet();
        s.bus_plate = None;
        assert!(!route_list(&[s]).contains("bus "));
    }

    #[test]
    fn test_passenger_table_rows() {
        let out = passenger_table(&[ticket(42, "007", true)]);
        assert!(out.contains("Juan Mejía"));
        assert!(out.contains("1805548996"));
        assert!(out.contains("007"));
        assert!(out.contains("10.00"));
        assert!(out.contains("yes"));
    }

    #[test]
    fn test_passenger_table_empty_message() {
        assert_eq!(
            passenger_table(&[]),
            "No tickets sold for this route sheet.\n"
        );
    }

    #[test]
    fn test_seat_map_groups_rows_of_four_with_aisle() {
        let tickets = vec![ticket(1, "3", false), ticket(2, "06", true)];
        let seats = derive_seats(8, 1, 0, &tickets);
        let out = seat_map(&seats);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "  front");
        // Aisle gap between columns 2 and 3; seat 3 reserved, seat 6 boarded.
        assert_eq!(lines[1], "  [01 ] [02 ]    [03*] [04 ]");
        assert_eq!(lines[2], "  [05 ] [06#]    [07 ] [08 ]");
    }

    #[test]
    fn test_seat_map_partial_last_row() {
        let seats = derive_seats(6, 1, 0, &[]);
        let out = seat_map(&seats);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[2], "  [05 ] [06 ]");
    }

    #[test]
    fn test_seat_map_empty_floor() {
        assert_eq!(seat_map(&[]), "No seats on this floor.\n");
    }

    #[test]
    fn test_seat_map_includes_legend() {
        let seats = derive_seats(4, 1, 0, &[]);
        assert!(seat_map(&seats).contains("available"));
        assert!(seat_map(&seats).contains("not boarded"));
        assert!(seat_map(&seats).contains("boarded"));
    }
}
