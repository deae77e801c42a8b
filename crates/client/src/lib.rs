//! Ticketgate client library.
//!
//! Headless client for the event-ticketing REST API. One typed client per
//! backend domain (auth, events, tickets, orders, venues, staff, admin
//! analytics), all sharing:
//!
//! - a bearer-token [`session::SessionStore`] injected by reference at
//!   construction, with explicit load/save hooks for persistence
//! - an HTTP transport with a fixed-count exponential retry on transient
//!   network failures (application errors are surfaced, never retried)
//! - a tag-indexed response cache (`moka`): reads register tags, mutations
//!   invalidate them on success so dependent reads refetch
//!
//! # Example
//!
//! ```rust,ignore
//! use ticketgate_client::{ApiConfig, SessionStore, TicketgateClient};
//!
//! let config = ApiConfig::from_env()?;
//! let session = SessionStore::in_memory();
//! let client = TicketgateClient::new(&config, &session)?;
//!
//! client.auth().login(&email, &password).await?;
//! let events = client.events().list(Default::default()).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod guard;
pub mod http;
pub mod session;

pub use api::TicketgateClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use guard::GuardOutcome;
pub use session::SessionStore;
