//! Ticket endpoints: attendee ticket lists and gate scans.

use ticketgate_core::{Ticket, TicketCode, UserId};
use tracing::instrument;

use crate::cache::{CacheKey, CacheTag, CachedValue};
use crate::error::ApiError;

use super::ClientInner;

/// Client for the tickets domain.
pub struct TicketsApi<'a> {
    inner: &'a ClientInner,
}

impl<'a> TicketsApi<'a> {
    pub(super) const fn new(inner: &'a ClientInner) -> Self {
        Self { inner }
    }

    /// Tickets held by a user.
    ///
    /// Skip-aware: while the user id is still unknown (profile not yet
    /// loaded), pass `None` and no request is issued.
    ///
    /// # Errors
    ///
    /// Returns transport or decode failures.
    #[instrument(skip(self))]
    pub async fn for_user(&self, user_id: Option<UserId>) -> Result<Option<Vec<Ticket>>, ApiError> {
        let Some(user_id) = user_id else {
            return Ok(None);
        };

        let transport = &self.inner.transport;
        let value = self
            .inner
            .cache
            .get_or_load(
                CacheKey::TicketList(user_id),
                vec![CacheTag::TicketList(user_id), CacheTag::AnyTicketList],
                async move {
                    let tickets: Vec<Ticket> = transport
                        .get_json(&format!("/tickets/user/{user_id}"))
                        .await?;
                    Ok(CachedValue::Tickets(tickets))
                },
            )
            .await?;
        match value {
            CachedValue::Tickets(tickets) => Ok(Some(tickets)),
            _ => Err(ApiError::Cache("unexpected cached value for tickets".to_string())),
        }
    }

    /// Mark a ticket as scanned at the gate.
    ///
    /// On success the scanned-tickets view and every cached ticket list
    /// are invalidated; the holder cannot be identified from the code
    /// alone, so the umbrella ticket-list tag is used.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown codes; an already-scanned code
    /// surfaces as the backend's application error.
    #[instrument(skip(self), fields(code = %code))]
    pub async fn scan(&self, code: &TicketCode) -> Result<Ticket, ApiError> {
        let ticket: Ticket = self
            .inner
            .transport
            .post_json(
                &format!("/tickets/{}/scan", urlencoding::encode(code.as_str())),
                &serde_json::json!({}),
            )
            .await?;

        self.inner
            .cache
            .invalidate(&[CacheTag::StaffScanned, CacheTag::AnyTicketList])
            .await?;

        Ok(ticket)
    }
}
