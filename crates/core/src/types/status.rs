//! Status and role enums for the ticketing domain.

use serde::{Deserialize, Serialize};

/// User role.
///
/// Drives the role-gated guards in the client; the backend is the source
/// of truth and the value is carried in the session slice after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Attendee,
    Organizer,
    Staff,
    Admin,
}

impl Role {
    /// Whether this role satisfies a guard requiring `required`.
    ///
    /// `Admin` passes every guard; other roles only pass their own.
    #[must_use]
    pub fn satisfies(&self, required: Self) -> bool {
        *self == Self::Admin || *self == required
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::Attendee => "attendee",
            Self::Organizer => "organizer",
            Self::Staff => "staff",
            Self::Admin => "admin",
        };
        write!(f, "{s}")
    }
}

/// Order lifecycle status.
///
/// Created as `Pending` at checkout; transitions are reported by the
/// backend, never decided client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Cancelled,
    Refunded,
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Wallet,
    Cash,
}
