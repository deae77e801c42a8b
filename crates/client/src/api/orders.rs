//! Checkout and order history endpoints.

use serde::Serialize;
use ticketgate_core::{
    CurrencyCode, Order, OrderId, PaymentMethod, Price, TicketType, TicketTypeId, UserId,
};
use tracing::instrument;

use crate::cache::{CacheKey, CacheTag, CachedValue};
use crate::error::ApiError;

use super::ClientInner;

/// One staged line in a checkout.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDraft {
    pub ticket_type_id: TicketTypeId,
    pub quantity: u32,
    pub unit_price: Price,
}

/// Payload for `POST /orders`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub user_id: UserId,
    pub items: Vec<OrderItemDraft>,
    pub subtotal: Price,
    pub total: Price,
    pub payment_method: PaymentMethod,
}

/// Stages ticket selections for checkout.
///
/// Quantities are clamped against each tier's remaining availability, so
/// a draft can never request below zero or beyond what is purchasable.
#[derive(Debug)]
pub struct CheckoutBuilder {
    user_id: UserId,
    payment_method: PaymentMethod,
    currency: CurrencyCode,
    items: Vec<OrderItemDraft>,
}

impl CheckoutBuilder {
    #[must_use]
    pub const fn new(user_id: UserId, payment_method: PaymentMethod, currency: CurrencyCode) -> Self {
        Self {
            user_id,
            payment_method,
            currency,
            items: Vec::new(),
        }
    }

    /// Stage `requested` tickets of a tier, clamped into the purchasable
    /// range. A quantity that clamps to zero stages nothing.
    pub fn add(&mut self, tier: &TicketType, requested: i64) -> &mut Self {
        let quantity = tier.clamp_quantity(requested);
        if quantity > 0 {
            self.items.push(OrderItemDraft {
                ticket_type_id: tier.id,
                quantity,
                unit_price: tier.price,
            });
        }
        self
    }

    /// Subtotal of the staged lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items
            .iter()
            .fold(Price::zero(self.currency), |acc, item| {
                acc.checked_add(&item.unit_price.times(item.quantity))
                    .unwrap_or(acc)
            })
    }

    /// Finish staging.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when nothing is staged or when a staged line
    /// is priced in a different currency than the builder's; a line the
    /// subtotal cannot account for must never reach the backend.
    pub fn build(self) -> Result<OrderDraft, ApiError> {
        if self.items.is_empty() {
            return Err(ApiError::Validation(
                "checkout requires at least one ticket".to_string(),
            ));
        }
        if let Some(item) = self
            .items
            .iter()
            .find(|item| item.unit_price.currency_code != self.currency)
        {
            return Err(ApiError::Validation(format!(
                "ticket tier {} is priced in {:?}, checkout currency is {:?}",
                item.ticket_type_id, item.unit_price.currency_code, self.currency
            )));
        }
        let subtotal = self.subtotal();
        Ok(OrderDraft {
            user_id: self.user_id,
            items: self.items,
            subtotal,
            // Fees and discounts are computed server-side; the client
            // submits total == subtotal and displays what comes back.
            total: subtotal,
            payment_method: self.payment_method,
        })
    }
}

/// Client for the orders domain.
pub struct OrdersApi<'a> {
    inner: &'a ClientInner,
}

impl<'a> OrdersApi<'a> {
    pub(super) const fn new(inner: &'a ClientInner) -> Self {
        Self { inner }
    }

    /// Submit a checkout.
    ///
    /// On success the buyer's order and ticket lists go stale, as do the
    /// event lists (sold quantities changed).
    ///
    /// # Errors
    ///
    /// Returns transport or decode failures; quantity conflicts surface
    /// as the backend's application error.
    #[instrument(skip(self, draft), fields(user_id = %draft.user_id))]
    pub async fn checkout(&self, draft: &OrderDraft) -> Result<Order, ApiError> {
        let order: Order = self.inner.transport.post_json("/orders", draft).await?;

        self.inner
            .cache
            .invalidate(&[
                CacheTag::OrderList(draft.user_id),
                CacheTag::TicketList(draft.user_id),
                CacheTag::AnyTicketList,
                CacheTag::EventList,
                CacheTag::FeaturedEvents,
                CacheTag::CategoryEvents,
            ])
            .await?;

        Ok(order)
    }

    /// Order history for a user. Skip-aware like
    /// [`super::tickets::TicketsApi::for_user`].
    ///
    /// # Errors
    ///
    /// Returns transport or decode failures.
    #[instrument(skip(self))]
    pub async fn for_user(&self, user_id: Option<UserId>) -> Result<Option<Vec<Order>>, ApiError> {
        let Some(user_id) = user_id else {
            return Ok(None);
        };

        let transport = &self.inner.transport;
        let value = self
            .inner
            .cache
            .get_or_load(
                CacheKey::OrderList(user_id),
                vec![CacheTag::OrderList(user_id)],
                async move {
                    let orders: Vec<Order> = transport
                        .get_json(&format!("/orders/user/{user_id}"))
                        .await?;
                    Ok(CachedValue::Orders(orders))
                },
            )
            .await?;
        match value {
            CachedValue::Orders(orders) => Ok(Some(orders)),
            _ => Err(ApiError::Cache("unexpected cached value for orders".to_string())),
        }
    }

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown IDs or transport/decode failures.
    #[instrument(skip(self))]
    pub async fn get(&self, id: OrderId) -> Result<Order, ApiError> {
        let transport = &self.inner.transport;
        let value = self
            .inner
            .cache
            .get_or_load(CacheKey::Order(id), vec![CacheTag::Order(id)], async move {
                let order: Order = transport.get_json(&format!("/orders/{id}")).await?;
                Ok(CachedValue::Order(Box::new(order)))
            })
            .await?;
        match value {
            CachedValue::Order(order) => Ok(*order),
            _ => Err(ApiError::Cache("unexpected cached value for order".to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use ticketgate_core::EventId;

    fn tier(id: i64, price_cents: i64, available: u32, sold: u32) -> TicketType {
        TicketType {
            id: TicketTypeId::new(id),
            event_id: EventId::new(1),
            name: "GA".to_string(),
            price: Price::new(Decimal::new(price_cents, 2), CurrencyCode::USD),
            quantity_available: available,
            quantity_sold: sold,
        }
    }

    fn builder() -> CheckoutBuilder {
        CheckoutBuilder::new(UserId::new(1), PaymentMethod::Card, CurrencyCode::USD)
    }

    #[test]
    fn test_add_clamps_to_remaining() {
        let mut b = builder();
        b.add(&tier(1, 2500, 10, 8), 5);
        let draft = b.build().unwrap();
        assert_eq!(draft.items[0].quantity, 2);
    }

    #[test]
    fn test_add_negative_stages_nothing() {
        let mut b = builder();
        b.add(&tier(1, 2500, 10, 0), -3);
        assert!(b.build().is_err());
    }

    #[test]
    fn test_sold_out_tier_stages_nothing() {
        let mut b = builder();
        b.add(&tier(1, 2500, 10, 10), 1);
        assert!(matches!(b.build(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_subtotal_and_total() {
        let mut b = builder();
        b.add(&tier(1, 2500, 100, 0), 2); // 2 x $25.00
        b.add(&tier(2, 1000, 100, 0), 3); // 3 x $10.00
        let draft = b.build().unwrap();
        assert_eq!(draft.subtotal.amount, Decimal::new(8000, 2));
        assert_eq!(draft.total, draft.subtotal);
    }

    #[test]
    fn test_mixed_currency_checkout_rejected() {
        let eur_tier = TicketType {
            id: TicketTypeId::new(2),
            event_id: EventId::new(1),
            name: "GA (EUR)".to_string(),
            price: Price::new(Decimal::new(9900, 2), CurrencyCode::EUR),
            quantity_available: 100,
            quantity_sold: 0,
        };

        let mut b = builder();
        b.add(&tier(1, 2500, 100, 0), 1);
        b.add(&eur_tier, 1);

        // Both lines stage, but a draft whose subtotal cannot account for
        // every line must not build.
        assert!(matches!(b.build(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_empty_checkout_rejected() {
        assert!(matches!(
            builder().build(),
            Err(ApiError::Validation(_))
        ));
    }
}
