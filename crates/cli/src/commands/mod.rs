//! Command implementations for `tg-cli`.
//!
//! Each submodule holds the async handlers for one command group. They
//! all operate on a [`CliContext`], which wires the environment-derived
//! API config, the session store, and the typed client together once
//! per invocation.

use std::path::PathBuf;

use thiserror::Error;
use ticketgate_client::config::ConfigError;
use ticketgate_client::export::ExportError;
use ticketgate_client::guard::{self, GuardOutcome};
use ticketgate_client::session::SessionUser;
use ticketgate_client::{ApiConfig, ApiError, SessionStore, TicketgateClient};
use ticketgate_core::{EmailError, Role, TicketCodeError};

pub mod admin;
pub mod auth;
pub mod events;
pub mod staff;
pub mod tickets;

/// Errors surfaced to the top-level error handler.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration is missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Ticket export failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// A command argument is not a valid email address.
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    /// A command argument is not a valid ticket code.
    #[error("Invalid ticket code: {0}")]
    Code(#[from] TicketCodeError),

    /// The session does not satisfy the command's role requirement.
    #[error("Not authorized: {0}. Run `tg-cli auth login` first.")]
    Forbidden(&'static str),

    /// Reading from the terminal failed.
    #[error("Input error: {0}")]
    Input(String),
}

/// Shared state for one CLI invocation.
pub struct CliContext {
    client: TicketgateClient,
    session: SessionStore,
}

impl CliContext {
    /// Build the context from `TICKETGATE_*` environment variables.
    ///
    /// The session slice is loaded from `TICKETGATE_SESSION_FILE` when
    /// set; without it each invocation starts logged out.
    pub fn from_env() -> Result<Self, CliError> {
        dotenvy::dotenv().ok();

        let config = ApiConfig::from_env()?;
        let session = match config.session_file.clone() {
            Some(path) => SessionStore::with_file(path)?,
            None => SessionStore::in_memory(),
        };
        let client = TicketgateClient::new(&config, &session)?;
        Ok(Self { client, session })
    }

    pub const fn client(&self) -> &TicketgateClient {
        &self.client
    }

    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The logged-in identity, or a [`CliError::Forbidden`] if there is none.
    pub fn current_user(&self) -> Result<SessionUser, CliError> {
        self.session
            .current_user()
            .ok_or(CliError::Forbidden("no active session"))
    }

    /// Gate a command on a role, mirroring the storefront's route guards.
    pub fn require_role(&self, required: &[Role], label: &'static str) -> Result<(), CliError> {
        match guard::require_role(&self.session, required) {
            GuardOutcome::Allow => Ok(()),
            GuardOutcome::RedirectToLogin => Err(CliError::Forbidden(label)),
        }
    }
}

/// Resolve the output directory for exports, defaulting to the working
/// directory.
pub fn export_dir(dir: Option<PathBuf>) -> PathBuf {
    dir.unwrap_or_else(|| PathBuf::from("."))
}
