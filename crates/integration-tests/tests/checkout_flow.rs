//! Checkout submission and the staleness it causes.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use serde_json::json;
use ticketgate_client::api::orders::CheckoutBuilder;
use ticketgate_core::{
    CurrencyCode, EventId, PaymentMethod, Price, TicketType, TicketTypeId, UserId,
};
use ticketgate_integration_tests::{TestContext, order_json, ticket_json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn tier(available: u32, sold: u32) -> TicketType {
    TicketType {
        id: TicketTypeId::new(1),
        event_id: EventId::new(5),
        name: "General Admission".to_string(),
        price: Price::new(Decimal::new(2500, 2), CurrencyCode::USD),
        quantity_available: available,
        quantity_sold: sold,
    }
}

#[tokio::test]
async fn checkout_submits_the_clamped_draft() {
    let ctx = TestContext::new().await;

    // 12 requested, 10 remaining: the draft carries 10.
    let mut builder = CheckoutBuilder::new(UserId::new(1), PaymentMethod::Card, CurrencyCode::USD);
    builder.add(&tier(50, 40), 12);
    let draft = builder.build().unwrap();

    let expected = json!({
        "userId": 1,
        "items": [{ "ticketTypeId": 1, "quantity": 10, "unitPrice": { "amount": "25.00", "currencyCode": "USD" } }],
        "subtotal": { "amount": "250.00", "currencyCode": "USD" },
        "total": { "amount": "250.00", "currencyCode": "USD" },
        "paymentMethod": "card",
    });
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json(42, 1)))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let order = ctx.client.orders().checkout(&draft).await.unwrap();
    assert_eq!(order.user_id, UserId::new(1));
}

#[tokio::test]
async fn checkout_stales_the_buyers_orders_and_tickets() {
    let ctx = TestContext::new().await;
    let user_id = UserId::new(1);

    Mock::given(method("GET"))
        .and(path("/orders/user/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![order_json(40, 1)]))
        .expect(2)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tickets/user/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(vec![ticket_json(1, 5, "TG-5-1")]),
        )
        .expect(2)
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json(42, 1)))
        .expect(1)
        .mount(&ctx.server)
        .await;

    ctx.client.orders().for_user(Some(user_id)).await.unwrap();
    ctx.client.tickets().for_user(Some(user_id)).await.unwrap();

    let mut builder = CheckoutBuilder::new(user_id, PaymentMethod::Card, CurrencyCode::USD);
    builder.add(&tier(50, 0), 2);
    ctx.client
        .orders()
        .checkout(&builder.build().unwrap())
        .await
        .unwrap();

    // Both lists refetch after the purchase.
    ctx.client.orders().for_user(Some(user_id)).await.unwrap();
    ctx.client.tickets().for_user(Some(user_id)).await.unwrap();
}

#[tokio::test]
async fn empty_checkout_never_reaches_the_server() {
    let ctx = TestContext::new().await;

    let builder = CheckoutBuilder::new(UserId::new(1), PaymentMethod::Card, CurrencyCode::USD);
    assert!(builder.build().is_err());
    assert!(ctx.server.received_requests().await.unwrap().is_empty());
}
