//! Tag-driven cache behavior across reads and mutations.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use serde_json::json;
use ticketgate_client::ApiError;
use ticketgate_client::api::events::{EventDraft, EventListParams};
use ticketgate_core::{EventId, VenueId};
use ticketgate_integration_tests::{TestContext, event_json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn list_body(titles: &[&str]) -> serde_json::Value {
    let events: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(i, t)| event_json(i64::try_from(i).unwrap() + 1, t))
        .collect();
    json!({ "events": events, "totalCount": titles.len(), "page": 1 })
}

fn draft() -> EventDraft {
    EventDraft {
        title: "Midnight Jazz".to_string(),
        description: "An evening of live jazz".to_string(),
        category: "music".to_string(),
        starts_at: Utc.with_ymd_and_hms(2026, 9, 12, 20, 0, 0).unwrap(),
        ends_at: Utc.with_ymd_and_hms(2026, 9, 12, 23, 0, 0).unwrap(),
        venue_id: VenueId::new(3),
        poster_url: None,
        thumbnail_url: None,
        ticket_types: vec![],
    }
}

#[tokio::test]
async fn cached_read_issues_one_request() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/events/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(event_json(5, "Midnight Jazz")))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let first = ctx.client.events().get(EventId::new(5)).await.unwrap();
    let second = ctx.client.events().get(EventId::new(5)).await.unwrap();
    assert_eq!(first.title, second.title);
}

#[tokio::test]
async fn create_stales_the_list_but_not_details() {
    let ctx = TestContext::new().await;

    // The list is fetched, staled by the create, and fetched again.
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&["Before"])))
        .expect(2)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/events/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(event_json(1, "Before")))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(event_json(9, "Midnight Jazz")))
        .expect(1)
        .mount(&ctx.server)
        .await;

    ctx.client
        .events()
        .list(EventListParams::default())
        .await
        .unwrap();
    ctx.client.events().get(EventId::new(1)).await.unwrap();

    ctx.client.events().create(&draft()).await.unwrap();

    ctx.client
        .events()
        .list(EventListParams::default())
        .await
        .unwrap();
    // Detail pages carry their own tag; the create left this one alone.
    ctx.client.events().get(EventId::new(1)).await.unwrap();
}

#[tokio::test]
async fn failed_mutation_leaves_cache_intact() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&["Before"])))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/events"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "database down" })),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    ctx.client
        .events()
        .list(EventListParams::default())
        .await
        .unwrap();

    let err = ctx.client.events().create(&draft()).await.unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 500, .. }));

    // Still served from cache: the list mock only allows one hit.
    let page = ctx
        .client
        .events()
        .list(EventListParams::default())
        .await
        .unwrap();
    assert_eq!(page.events.first().unwrap().title, "Before");
}

#[tokio::test]
async fn search_variants_cache_separately() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&["A", "B"])))
        .expect(2)
        .mount(&ctx.server)
        .await;

    ctx.client
        .events()
        .list(EventListParams::default())
        .await
        .unwrap();
    ctx.client
        .events()
        .list(EventListParams {
            page: 1,
            search: Some("jazz".to_string()),
        })
        .await
        .unwrap();
}
