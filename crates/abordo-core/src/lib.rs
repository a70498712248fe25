//! # abordo-core
//!
//! Core domain logic for the abordo driver-side bus ticketing client.
//!
//! This crate provides:
//! - Seat-state derivation (folding the ticket set onto a synthetic seat grid)
//! - Ticket manifest handling and QR payload parsing
//! - Route-sheet snapshots ("hoja de trabajo")
//! - Durable session storage for the authenticated driver
//! - Application configuration loading, saving, and overrides
//!
//! ## Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`seats`] - Pure derivation of per-seat occupancy from the ticket set
//! - [`tickets`] - Ticket type, boarding manifest, and QR payload parsing
//! - [`routes`] - Route-sheet snapshot type and per-floor helpers
//! - [`session`] - Driver session and its durable key-value store
//! - [`config`] - Application configuration (API base URL, timeouts)
//! - [`error`] - Unified error types for the crate

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod routes;
pub mod seats;
pub mod session;
pub mod tickets;

// Re-export primary types for convenience
pub use config::{AppConfig, ConfigError};
pub use error::{AbordoError, Result};
pub use routes::{find_sheet, RouteSheet};
pub use seats::{derive_floor, derive_seats, Seat, SeatStatus, SEATS_PER_ROW};
pub use session::{FileSessionStore, Session, SessionStore, SessionStoreError};
pub use tickets::{parse_qr_payload, Manifest, QrError, Ticket};
