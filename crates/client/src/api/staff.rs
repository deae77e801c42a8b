//! Check-in staff endpoints.
//!
//! The backend keys these views on the staff member's email address, so
//! the address is percent-encoded into the path.

use serde::{Deserialize, Serialize};
use ticketgate_core::{Email, Event, EventId, Ticket};
use tracing::instrument;

use crate::cache::{CacheKey, CacheTag, CachedValue};
use crate::error::ApiError;

use super::ClientInner;

/// Payload for assigning a staff member to an event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignStaffRequest {
    pub event_id: EventId,
    pub staff_email: Email,
}

/// Acknowledgement of a staff assignment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffAssignment {
    pub event_id: EventId,
    pub staff_email: Email,
}

/// Client for the staff domain.
pub struct StaffApi<'a> {
    inner: &'a ClientInner,
}

impl<'a> StaffApi<'a> {
    pub(super) const fn new(inner: &'a ClientInner) -> Self {
        Self { inner }
    }

    /// Events the staff member is assigned to work.
    ///
    /// Skip-aware: `None` (email not yet known) issues no request.
    ///
    /// # Errors
    ///
    /// Returns transport or decode failures.
    #[instrument(skip(self))]
    pub async fn assigned_events(
        &self,
        email: Option<&Email>,
    ) -> Result<Option<Vec<Event>>, ApiError> {
        let Some(email) = email else {
            return Ok(None);
        };

        let transport = &self.inner.transport;
        let path = format!(
            "/events/staff/assigned/{}",
            urlencoding::encode(email.as_str())
        );
        let value = self
            .inner
            .cache
            .get_or_load(
                CacheKey::StaffAssigned(email.as_str().to_string()),
                vec![CacheTag::StaffAssigned],
                async move {
                    let events: Vec<Event> = transport.get_json(&path).await?;
                    Ok(CachedValue::AssignedEvents(events))
                },
            )
            .await?;
        match value {
            CachedValue::AssignedEvents(events) => Ok(Some(events)),
            _ => Err(ApiError::Cache("unexpected cached value for assignments".to_string())),
        }
    }

    /// Tickets this staff member has scanned.
    ///
    /// Skip-aware: `None` issues no request.
    ///
    /// # Errors
    ///
    /// Returns transport or decode failures.
    #[instrument(skip(self))]
    pub async fn scanned_tickets(
        &self,
        email: Option<&Email>,
    ) -> Result<Option<Vec<Ticket>>, ApiError> {
        let Some(email) = email else {
            return Ok(None);
        };

        let transport = &self.inner.transport;
        let path = format!(
            "/events/staff/scanned/{}",
            urlencoding::encode(email.as_str())
        );
        let value = self
            .inner
            .cache
            .get_or_load(
                CacheKey::StaffScanned(email.as_str().to_string()),
                vec![CacheTag::StaffScanned],
                async move {
                    let tickets: Vec<Ticket> = transport.get_json(&path).await?;
                    Ok(CachedValue::ScannedTickets(tickets))
                },
            )
            .await?;
        match value {
            CachedValue::ScannedTickets(tickets) => Ok(Some(tickets)),
            _ => Err(ApiError::Cache("unexpected cached value for scans".to_string())),
        }
    }

    /// Assign a staff member to an event (organizer action).
    ///
    /// Stales every staff-assignment view on success.
    ///
    /// # Errors
    ///
    /// Returns transport or decode failures.
    #[instrument(skip(self, request), fields(organizer = %organizer_email, event_id = %request.event_id))]
    pub async fn assign_staff(
        &self,
        organizer_email: &Email,
        request: &AssignStaffRequest,
    ) -> Result<StaffAssignment, ApiError> {
        let path = format!(
            "/events/organizer/{}/assignStaff",
            urlencoding::encode(organizer_email.as_str())
        );
        let assignment: StaffAssignment = self.inner.transport.post_json(&path, request).await?;
        self.inner.cache.invalidate(&[CacheTag::StaffAssigned]).await?;
        Ok(assignment)
    }
}
