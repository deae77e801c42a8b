//! Retry policy and status-code mapping at the transport boundary.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::json;
use ticketgate_client::ApiError;
use ticketgate_core::{EventId, OrderId, UserId};
use ticketgate_integration_tests::{TestContext, event_json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn timeouts_are_retried_until_the_budget_runs_out() {
    let ctx = TestContext::with_fast_retries(2).await;

    // Every attempt outlives the 200ms client timeout.
    Mock::given(method("GET"))
        .and(path("/events/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(event_json(7, "Never arrives"))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(3) // initial attempt + 2 retries
        .mount(&ctx.server)
        .await;

    let err = ctx.client.events().get(EventId::new(7)).await.unwrap_err();
    assert!(err.is_transient());
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let ctx = TestContext::with_fast_retries(3).await;

    Mock::given(method("GET"))
        .and(path("/events/7"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let err = ctx.client.events().get(EventId::new(7)).await.unwrap_err();
    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected application error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_resources_map_to_not_found() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/orders/404"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let err = ctx
        .client
        .orders()
        .get(OrderId::new(404))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn rejected_credentials_map_to_unauthorized() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let err = ctx.login_as("ada@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
}

#[tokio::test]
async fn rate_limits_carry_the_retry_after_hint() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/tickets/user/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "17"))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let err = ctx
        .client
        .tickets()
        .for_user(Some(UserId::new(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::RateLimited(17)));
}
