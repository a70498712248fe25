//! Command handlers: one per screen of the driver flow.
//!
//! Each handler reads the stored session, issues its REST calls, renders to
//! stdout, and lets errors bubble to `main` where they are printed once. The
//! session store is injected by the composition root; nothing here reaches
//! for ambient global state.

use std::io::Write;

use anyhow::{Context, Result};

use abordo_client::ApiClient;
use abordo_core::seats::derive_floor;
use abordo_core::session::{Session, SessionStore};
use abordo_core::tickets::{parse_qr_payload, Manifest};
use abordo_core::{AbordoError, FileSessionStore};

use crate::render;

/// Authenticate, apply the driver policy, and persist the session.
///
/// A policy rejection (inactive account, non-driver role, bad credentials)
/// leaves no session behind.
pub async fn login(
    client: &ApiClient,
    store: &FileSessionStore,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = match email {
        Some(e) => e,
        None => prompt("Email: ")?,
    };
    let password = match password {
        Some(p) => p,
        None => prompt("Password: ")?,
    };

    if email.trim().is_empty() || password.trim().is_empty() {
        anyhow::bail!("Email and password are required");
    }

    let session = client.login(&email, &password).await?;
    store.save(&session)?;

    println!("Logged in as {}.", session.display_name());
    Ok(())
}

/// Destroy the stored session.
pub fn logout(store: &FileSessionStore) -> Result<()> {
    store.clear()?;
    println!("Session cleared.");
    Ok(())
}

/// List today's assigned route sheets, earliest departure first.
pub async fn routes(client: &ApiClient, store: &FileSessionStore) -> Result<()> {
    let session = require_session(store)?;
    let mut sheets = client.scheduled_sheets(&session.auth_token).await?;

    // Unparseable departure times sort last.
    sheets.sort_by_key(|s| (s.departure_time().is_none(), s.departure_time()));

    println!("Hello, {}.", session.display_name());
    print!("{}", render::route_list(&sheets));
    Ok(())
}

/// Show the passenger manifest for one route sheet.
pub async fn passengers(client: &ApiClient, store: &FileSessionStore, sheet_id: i64) -> Result<()> {
    let session = require_session(store)?;
    let sheet = client.sheet_by_id(&session.auth_token, sheet_id).await?;
    let manifest = Manifest::new(client.tickets_for_sheet(&session.auth_token, sheet.id).await?);

    println!(
        "{} {} -> {} ({} passengers)",
        sheet.code,
        sheet.origin_city,
        sheet.destination_city,
        manifest.len()
    );
    print!("{}", render::passenger_table(manifest.tickets()));
    Ok(())
}

/// Show the seat map for one floor of a route sheet.
pub async fn seats(
    client: &ApiClient,
    store: &FileSessionStore,
    sheet_id: i64,
    floor: u8,
) -> Result<()> {
    if !matches!(floor, 1 | 2) {
        return Err(AbordoError::MalformedInput(format!("No floor {floor}; buses have 1 or 2"))
            .into());
    }

    let session = require_session(store)?;
    let sheet = client.sheet_by_id(&session.auth_token, sheet_id).await?;

    if floor == 2 && !sheet.has_second_floor {
        println!("{} has a single floor.", sheet.code);
        return Ok(());
    }

    let tickets = client.tickets_for_sheet(&session.auth_token, sheet.id).await?;
    let layout = derive_floor(&sheet, floor, &tickets);

    if sheet.has_second_floor {
        println!("{} - floor {floor}", sheet.code);
    } else {
        println!("{}", sheet.code);
    }
    print!("{}", render::seat_map(&layout));
    Ok(())
}

/// Validate a scanned ticket against the sheet's manifest and mark it
/// boarded.
///
/// Accepts the decoded QR payload (a JSON object carrying the ticket id) or
/// a bare ticket id. On server confirmation the ticket is removed from the
/// local manifest exactly once; on failure the manifest is left unchanged.
pub async fn board(
    client: &ApiClient,
    store: &FileSessionStore,
    sheet_id: i64,
    payload: &str,
) -> Result<()> {
    let session = require_session(store)?;

    let ticket_id = match payload.trim().parse::<i64>() {
        Ok(id) => id,
        Err(_) => parse_qr_payload(payload).map_err(AbordoError::from)?,
    };

    let mut manifest =
        Manifest::new(client.tickets_for_sheet(&session.auth_token, sheet_id).await?);

    let ticket = manifest
        .find(ticket_id)
        .ok_or(AbordoError::TicketNotFound(ticket_id))?;

    if ticket.boarded {
        println!(
            "Ticket {} ({}, seat {}) is already boarded.",
            ticket.id, ticket.passenger_name, ticket.seat_number
        );
        return Ok(());
    }

    client.board_ticket(&session.auth_token, ticket_id).await?;

    // Server confirmed; reconcile the local set.
    let boarded = manifest
        .take(ticket_id)
        .ok_or(AbordoError::TicketNotFound(ticket_id))?;

    println!(
        "Boarded {} (seat {}). {} tickets pending on this sheet.",
        boarded.passenger_name,
        boarded.seat_number,
        manifest.len()
    );
    Ok(())
}

/// Read the stored session or fail with a login hint.
fn require_session(store: &FileSessionStore) -> Result<Session> {
    let session = store
        .load()
        .map_err(AbordoError::from)?
        .ok_or(AbordoError::NotLoggedIn)?;
    Ok(session)
}

/// Prompt on stdout and read one trimmed line from stdin.
fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}
