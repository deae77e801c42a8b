//! Ticketgate CLI - headless storefront access from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in (persists the session when TICKETGATE_SESSION_FILE is set)
//! tg-cli auth login -e user@example.com -p secret
//!
//! # Browse the catalog
//! tg-cli events list --page 1 --search jazz
//! tg-cli events show 42
//! tg-cli events featured
//!
//! # Tickets
//! tg-cli tickets list
//! tg-cli tickets scan TG-42-7
//! tg-cli tickets export 42 --out ./exports
//!
//! # Door duty
//! tg-cli staff assigned
//! tg-cli staff scanned
//! tg-cli staff assign 42 -e staff@example.com
//!
//! # Analytics
//! tg-cli admin summary
//! tg-cli admin wallet
//! tg-cli admin revenue
//! ```
//!
//! # Environment Variables
//!
//! - `TICKETGATE_API_BASE_URL` - Base URL of the ticketing REST API
//! - `TICKETGATE_SESSION_FILE` - Where to persist the session between runs

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::{CliContext, CliError};

#[derive(Parser)]
#[command(name = "tg-cli")]
#[command(author, version, about = "Ticketgate CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the login session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Browse the event catalog
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },
    /// List, scan, and export tickets
    Tickets {
        #[command(subcommand)]
        action: TicketsAction,
    },
    /// Staff door-duty views and assignments
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
    /// Organizer and admin analytics
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Log in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password; prompted on stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Log out and clear the cached session
    Logout,
    /// Show the active identity
    Whoami,
}

#[derive(Subcommand)]
enum EventsAction {
    /// List a page of events
    List {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Filter by a search term
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one event with its ticket tiers
    Show {
        /// Event ID
        id: i64,
    },
    /// List the featured events
    Featured,
}

#[derive(Subcommand)]
enum TicketsAction {
    /// List your tickets
    List,
    /// Scan an admission code or QR payload (staff)
    Scan {
        /// Admission code or QR payload
        code: String,
    },
    /// Export your tickets for an event as a renderable document
    Export {
        /// Event ID
        event_id: i64,

        /// Output directory (defaults to the working directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum StaffAction {
    /// List your assigned events (staff)
    Assigned,
    /// List the tickets you have scanned (staff)
    Scanned,
    /// Assign a staff member to an event (organizer)
    Assign {
        /// Event ID
        event_id: i64,

        /// Staff member's email address
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Platform-wide dashboard numbers (admin)
    Summary,
    /// Your wallet balances (organizer)
    Wallet,
    /// Your per-event revenue report (organizer)
    Revenue,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = CliContext::from_env()?;

    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&ctx, &email, password).await?;
            }
            AuthAction::Logout => commands::auth::logout(&ctx).await?,
            AuthAction::Whoami => commands::auth::whoami(&ctx)?,
        },
        Commands::Events { action } => match action {
            EventsAction::List { page, search } => {
                commands::events::list(&ctx, page, search).await?;
            }
            EventsAction::Show { id } => commands::events::show(&ctx, id).await?,
            EventsAction::Featured => commands::events::featured(&ctx).await?,
        },
        Commands::Tickets { action } => match action {
            TicketsAction::List => commands::tickets::list(&ctx).await?,
            TicketsAction::Scan { code } => commands::tickets::scan(&ctx, &code).await?,
            TicketsAction::Export { event_id, out } => {
                commands::tickets::export(&ctx, event_id, out).await?;
            }
        },
        Commands::Staff { action } => match action {
            StaffAction::Assigned => commands::staff::assigned(&ctx).await?,
            StaffAction::Scanned => commands::staff::scanned(&ctx).await?,
            StaffAction::Assign { event_id, email } => {
                commands::staff::assign(&ctx, event_id, &email).await?;
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Summary => commands::admin::summary(&ctx).await?,
            AdminAction::Wallet => commands::admin::wallet(&ctx).await?,
            AdminAction::Revenue => commands::admin::revenue(&ctx).await?,
        },
    }
    Ok(())
}
