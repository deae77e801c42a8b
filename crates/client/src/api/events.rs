//! Event catalog endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ticketgate_core::{Event, EventId, Price, VenueId};
use tracing::instrument;

use crate::cache::{CacheKey, CacheTag, CachedValue};
use crate::error::ApiError;

use super::ClientInner;

/// Pagination and search parameters for the event list.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventListParams {
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for EventListParams {
    fn default() -> Self {
        Self {
            page: 1,
            search: None,
        }
    }
}

/// One page of the event list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    pub events: Vec<Event>,
    pub total_count: u64,
    pub page: u32,
}

/// Organizer-edited fields for creating or updating an event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub venue_id: VenueId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub ticket_types: Vec<TicketTypeDraft>,
}

/// Staged ticket tier within an event draft.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeDraft {
    pub name: String,
    pub price: Price,
    pub quantity_available: u32,
}

// A create/update stales every list flavor; detail pages only on update.
const LIST_TAGS: &[CacheTag] = &[
    CacheTag::EventList,
    CacheTag::FeaturedEvents,
    CacheTag::CategoryEvents,
];

/// Client for the events domain.
pub struct EventsApi<'a> {
    inner: &'a ClientInner,
}

impl<'a> EventsApi<'a> {
    pub(super) const fn new(inner: &'a ClientInner) -> Self {
        Self { inner }
    }

    /// Fetch one page of the event list.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for invalid drafts and transport/decode
    /// failures otherwise.
    #[instrument(skip(self))]
    pub async fn list(&self, params: EventListParams) -> Result<EventPage, ApiError> {
        let transport = &self.inner.transport;
        let key = CacheKey::EventList {
            page: params.page,
            search: params.search.clone(),
        };
        let value = self
            .inner
            .cache
            .get_or_load(key, vec![CacheTag::EventList], async move {
                let page: EventPage = transport
                    .get_json_with_query("/events", &params)
                    .await?;
                Ok(CachedValue::EventPage(page))
            })
            .await?;
        match value {
            CachedValue::EventPage(page) => Ok(page),
            _ => Err(ApiError::Cache("unexpected cached value for event list".to_string())),
        }
    }

    /// Fetch one event with its nested ticket types.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown IDs or transport/decode failures.
    #[instrument(skip(self))]
    pub async fn get(&self, id: EventId) -> Result<Event, ApiError> {
        let transport = &self.inner.transport;
        let value = self
            .inner
            .cache
            .get_or_load(CacheKey::Event(id), vec![CacheTag::Event(id)], async move {
                let event: Event = transport.get_json(&format!("/events/{id}")).await?;
                Ok(CachedValue::Event(Box::new(event)))
            })
            .await?;
        match value {
            CachedValue::Event(event) => Ok(*event),
            _ => Err(ApiError::Cache("unexpected cached value for event".to_string())),
        }
    }

    /// Fetch the curated featured list.
    ///
    /// # Errors
    ///
    /// Returns transport or decode failures.
    #[instrument(skip(self))]
    pub async fn featured(&self) -> Result<Vec<Event>, ApiError> {
        let transport = &self.inner.transport;
        let value = self
            .inner
            .cache
            .get_or_load(
                CacheKey::FeaturedEvents,
                vec![CacheTag::FeaturedEvents],
                async move {
                    let events: Vec<Event> = transport.get_json("/events/featured").await?;
                    Ok(CachedValue::Events(events))
                },
            )
            .await?;
        match value {
            CachedValue::Events(events) => Ok(events),
            _ => Err(ApiError::Cache("unexpected cached value for featured events".to_string())),
        }
    }

    /// Fetch events in a category.
    ///
    /// # Errors
    ///
    /// Returns transport or decode failures.
    #[instrument(skip(self))]
    pub async fn by_category(&self, category: &str) -> Result<Vec<Event>, ApiError> {
        let transport = &self.inner.transport;
        let category_owned = category.to_string();
        let value = self
            .inner
            .cache
            .get_or_load(
                CacheKey::CategoryEvents(category_owned.clone()),
                vec![CacheTag::CategoryEvents],
                async move {
                    let events: Vec<Event> = transport
                        .get_json_with_query("/events/category", &[("name", category_owned)])
                        .await?;
                    Ok(CachedValue::Events(events))
                },
            )
            .await?;
        match value {
            CachedValue::Events(events) => Ok(events),
            _ => Err(ApiError::Cache("unexpected cached value for category events".to_string())),
        }
    }

    /// Create an event; stales every cached event list on success.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an invalid draft, or transport/decode
    /// failures.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create(&self, draft: &EventDraft) -> Result<Event, ApiError> {
        validate_draft(draft)?;
        let event: Event = self.inner.transport.post_json("/events", draft).await?;
        self.inner.cache.invalidate(LIST_TAGS).await?;
        Ok(event)
    }

    /// Update an event; stales the detail entry and every list on success.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an invalid draft, or transport/decode
    /// failures.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: EventId, draft: &EventDraft) -> Result<Event, ApiError> {
        validate_draft(draft)?;
        let event: Event = self
            .inner
            .transport
            .put_json(&format!("/events/{id}"), draft)
            .await?;
        let mut tags = vec![CacheTag::Event(id)];
        tags.extend_from_slice(LIST_TAGS);
        self.inner.cache.invalidate(&tags).await?;
        Ok(event)
    }
}

fn validate_draft(draft: &EventDraft) -> Result<(), ApiError> {
    if draft.title.trim().is_empty() {
        return Err(ApiError::Validation("event title cannot be empty".to_string()));
    }
    if draft.ends_at <= draft.starts_at {
        return Err(ApiError::Validation(
            "event must end after it starts".to_string(),
        ));
    }
    Ok(())
}
