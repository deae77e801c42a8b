//! Entity records mirrored from backend responses.
//!
//! These are plain snapshots of what the API returns; the client never
//! enforces referential integrity between them and refreshes them through
//! cache invalidation rather than in-place mutation. The wire format is
//! camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::code::TicketCode;
use crate::types::email::Email;
use crate::types::id::{EventId, OrderId, TicketId, TicketTypeId, UserId, VenueId};
use crate::types::price::Price;
use crate::types::status::{OrderStatus, PaymentMethod, Role};

/// A registered user of the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    /// Full display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A published event with its nested ticket types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub venue_id: VenueId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub ticket_types: Vec<TicketType>,
}

/// A purchasable ticket tier within an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    pub id: TicketTypeId,
    pub event_id: EventId,
    pub name: String,
    pub price: Price,
    pub quantity_available: u32,
    pub quantity_sold: u32,
}

impl TicketType {
    /// Tickets still purchasable for this tier.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.quantity_available.saturating_sub(self.quantity_sold)
    }

    /// Clamp a requested quantity into the purchasable range.
    ///
    /// Negative requests clamp to 0; requests above the remaining
    /// availability clamp to what is left.
    #[must_use]
    pub fn clamp_quantity(&self, requested: i64) -> u32 {
        let remaining = i64::from(self.remaining());
        u32::try_from(requested.clamp(0, remaining)).unwrap_or(0)
    }
}

/// A checkout order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub subtotal: Price,
    pub total: Price,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

/// One ticket-type line within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub ticket_type_id: TicketTypeId,
    pub quantity: u32,
    pub unit_price: Price,
}

/// An issued ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub order_id: OrderId,
    pub event_id: EventId,
    pub ticket_type_id: TicketTypeId,
    pub code: TicketCode,
    pub scanned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned_by: Option<Email>,
}

/// An event venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub address: String,
    pub capacity: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::price::CurrencyCode;
    use rust_decimal::Decimal;

    fn tier(available: u32, sold: u32) -> TicketType {
        TicketType {
            id: TicketTypeId::new(1),
            event_id: EventId::new(1),
            name: "General Admission".to_string(),
            price: Price::new(Decimal::new(2500, 2), CurrencyCode::USD),
            quantity_available: available,
            quantity_sold: sold,
        }
    }

    #[test]
    fn test_clamp_quantity_never_negative() {
        assert_eq!(tier(100, 0).clamp_quantity(-5), 0);
    }

    #[test]
    fn test_clamp_quantity_never_exceeds_remaining() {
        assert_eq!(tier(100, 90).clamp_quantity(50), 10);
        assert_eq!(tier(100, 100).clamp_quantity(1), 0);
    }

    #[test]
    fn test_clamp_quantity_in_range() {
        assert_eq!(tier(100, 10).clamp_quantity(4), 4);
    }

    #[test]
    fn test_remaining_saturates() {
        // Oversold tiers can come back from the API; remaining stays 0.
        assert_eq!(tier(100, 120).remaining(), 0);
    }

    #[test]
    fn test_entity_wire_format_is_camel_case() {
        let json = serde_json::to_value(tier(10, 2)).unwrap();
        assert!(json.get("quantityAvailable").is_some());
        assert!(json.get("eventId").is_some());
    }

    #[test]
    fn test_user_display_name() {
        let user = User {
            id: UserId::new(1),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            role: Role::Attendee,
            phone: None,
        };
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_ticket_deserializes_without_scan_fields() {
        let json = r#"{
            "id": 5,
            "orderId": 2,
            "eventId": 1,
            "ticketTypeId": 3,
            "code": "TG-1-5",
            "scanned": false
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert!(!ticket.scanned);
        assert!(ticket.scanned_at.is_none());
        assert!(ticket.scanned_by.is_none());
    }
}
