//! Test harness for exercising the Ticketgate client against a mock
//! backend.
//!
//! [`TestContext`] boots a [`wiremock::MockServer`], points a freshly
//! built [`TicketgateClient`] at it, and exposes JSON fixture builders
//! shaped like real backend responses. The tests in `tests/` drive the
//! client through full request/cache/session cycles against it.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use serde_json::{Value, json};
use ticketgate_client::config::RetryConfig;
use ticketgate_client::{ApiConfig, ApiError, SessionStore, TicketgateClient};
use wiremock::MockServer;

/// A client wired to a private mock backend.
pub struct TestContext {
    pub server: MockServer,
    pub client: TicketgateClient,
    pub session: SessionStore,
}

impl TestContext {
    /// Boot a mock server and a client with default tuning.
    ///
    /// # Panics
    ///
    /// Panics if the mock server URI is unparseable or the client cannot
    /// be built; either is a harness bug.
    #[allow(clippy::unwrap_used)]
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = ApiConfig::for_base_url(server.uri().parse().unwrap());
        Self::with_config(server, config)
    }

    /// Boot with a short timeout and fast backoff for retry tests.
    ///
    /// # Panics
    ///
    /// Panics if the mock server URI is unparseable or the client cannot
    /// be built.
    #[allow(clippy::unwrap_used)]
    pub async fn with_fast_retries(max_retries: u32) -> Self {
        let server = MockServer::start().await;
        let mut config = ApiConfig::for_base_url(server.uri().parse().unwrap());
        config.timeout = Duration::from_millis(200);
        config.retry = RetryConfig {
            max_retries,
            base_delay: Duration::from_millis(10),
        };
        Self::with_config(server, config)
    }

    #[allow(clippy::unwrap_used)]
    fn with_config(server: MockServer, config: ApiConfig) -> Self {
        let session = SessionStore::in_memory();
        let client = TicketgateClient::new(&config, &session).unwrap();
        Self {
            server,
            client,
            session,
        }
    }

    /// Log in through the client against an already-mounted login mock.
    ///
    /// # Errors
    ///
    /// Propagates the login failure.
    pub async fn login_as(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let email = email
            .parse()
            .map_err(|e| ApiError::Validation(format!("bad fixture email: {e}")))?;
        self.client.auth().login(&email, password).await?;
        Ok(())
    }
}

/// A user record as the backend serializes it.
#[must_use]
pub fn user_json(id: i64, email: &str, role: &str) -> Value {
    json!({
        "id": id,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": email,
        "role": role,
        "phone": null,
    })
}

/// A successful login/register response.
#[must_use]
pub fn auth_response_json(token: &str, user: Value) -> Value {
    json!({ "token": token, "user": user })
}

/// An event with one ticket tier.
#[must_use]
pub fn event_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "An evening of live jazz",
        "category": "music",
        "startsAt": "2026-09-12T20:00:00Z",
        "endsAt": "2026-09-12T23:00:00Z",
        "venueId": 3,
        "posterUrl": null,
        "thumbnailUrl": null,
        "ticketTypes": [ticket_type_json(1, id)],
    })
}

/// A ticket tier for `event_id`.
#[must_use]
pub fn ticket_type_json(id: i64, event_id: i64) -> Value {
    json!({
        "id": id,
        "eventId": event_id,
        "name": "General Admission",
        "price": price_json("25.00"),
        "quantityAvailable": 100,
        "quantitySold": 40,
    })
}

/// A money value in USD.
#[must_use]
pub fn price_json(amount: &str) -> Value {
    json!({ "amount": amount, "currencyCode": "USD" })
}

/// An unscanned ticket.
#[must_use]
pub fn ticket_json(id: i64, event_id: i64, code: &str) -> Value {
    json!({
        "id": id,
        "orderId": 7,
        "eventId": event_id,
        "ticketTypeId": 1,
        "code": code,
        "scanned": false,
        "scannedAt": null,
        "scannedBy": null,
    })
}

/// A paid order with one line item.
#[must_use]
pub fn order_json(id: i64, user_id: i64) -> Value {
    json!({
        "id": id,
        "userId": user_id,
        "items": [{
            "ticketTypeId": 1,
            "quantity": 2,
            "unitPrice": price_json("25.00"),
        }],
        "subtotal": price_json("50.00"),
        "total": price_json("50.00"),
        "status": "paid",
        "paymentMethod": "card",
        "createdAt": "2026-08-30T12:00:00Z",
    })
}

/// A venue record.
#[must_use]
pub fn venue_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "address": "131 W 3rd St",
        "capacity": 250,
    })
}
