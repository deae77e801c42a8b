//! Core types for Ticketgate.
//!
//! Type-safe wrappers for common domain concepts, plus the entity records
//! mirrored from backend responses.

pub mod code;
pub mod email;
pub mod entity;
pub mod id;
pub mod price;
pub mod status;

pub use code::{TicketCode, TicketCodeError};
pub use email::{Email, EmailError};
pub use entity::*;
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use status::*;
