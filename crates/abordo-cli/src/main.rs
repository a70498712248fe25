//! abordo - driver-side toolkit for a bus-ticketing system.
//!
//! Each subcommand plays the role of one screen of the original driver
//! application: login, route list, passenger manifest, seat map, and QR
//! boarding validation. Every command owns its own fetch-and-render cycle;
//! a failure is printed once and the process exits nonzero without retrying.
//!
//! # Environment Variables
//!
//! - `ABORDO_API_URL`: Optional. Overrides the configured API base URL
//! - `ABORDO_LOG`: Optional. Logging level (default: warn)

use clap::{Parser, Subcommand};

use abordo_client::ApiClient;
use abordo_core::{AppConfig, FileSessionStore};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "abordo", version, about = "Driver tools for bus ticket validation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as a driver and store the session
    Login {
        /// Email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// List today's assigned route sheets
    Routes,

    /// Show the passenger manifest for a route sheet
    Passengers {
        /// Route sheet id
        #[arg(long)]
        sheet: i64,
    },

    /// Show the seat map for a route sheet
    Seats {
        /// Route sheet id
        #[arg(long)]
        sheet: i64,

        /// Floor to show (1 or 2)
        #[arg(long, default_value_t = 1)]
        floor: u8,
    },

    /// Validate a scanned ticket and mark it boarded
    Board {
        /// Route sheet id
        #[arg(long)]
        sheet: i64,

        /// Decoded QR payload (JSON) or a bare ticket id
        payload: String,
    },
}

/// Initialize logging to stderr so stdout stays renderable output.
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env("ABORDO_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    let config = AppConfig::load()?;
    tracing::debug!(api = %config.normalized_base_url(), "configuration loaded");

    let store = FileSessionStore::default_location()?;
    let client = ApiClient::from_config(&config)?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::login(&client, &store, email, password).await
        }
        Commands::Logout => commands::logout(&store),
        Commands::Routes => commands::routes(&client, &store).await,
        Commands::Passengers { sheet } => commands::passengers(&client, &store, sheet).await,
        Commands::Seats { sheet, floor } => commands::seats(&client, &store, sheet, floor).await,
        Commands::Board { sheet, payload } => {
            commands::board(&client, &store, sheet, &payload).await
        }
    }
}
