//! Ticketgate Core - Shared types library.
//!
//! This crate provides the domain types shared by all Ticketgate components:
//! - `client` - Headless API client for the ticketing backend
//! - `cli` - Command-line tools built on the client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP. Entities mirror
//! backend responses and are treated as immutable snapshots; the client
//! refreshes them through cache invalidation rather than mutating them in
//! place.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, prices, ticket
//!   codes, and status enums, plus the entity records themselves.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
