//! Venue catalog endpoints.

use serde::Serialize;
use ticketgate_core::{Venue, VenueId};
use tracing::instrument;

use crate::cache::{CacheKey, CacheTag, CachedValue};
use crate::error::ApiError;

use super::ClientInner;

/// Payload for `POST /venues`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueDraft {
    pub name: String,
    pub address: String,
    pub capacity: u32,
}

/// Client for the venues domain.
pub struct VenuesApi<'a> {
    inner: &'a ClientInner,
}

impl<'a> VenuesApi<'a> {
    pub(super) const fn new(inner: &'a ClientInner) -> Self {
        Self { inner }
    }

    /// Fetch every venue.
    ///
    /// # Errors
    ///
    /// Returns transport or decode failures.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Venue>, ApiError> {
        let transport = &self.inner.transport;
        let value = self
            .inner
            .cache
            .get_or_load(CacheKey::VenueList, vec![CacheTag::VenueList], async move {
                let venues: Vec<Venue> = transport.get_json("/venues").await?;
                Ok(CachedValue::Venues(venues))
            })
            .await?;
        match value {
            CachedValue::Venues(venues) => Ok(venues),
            _ => Err(ApiError::Cache("unexpected cached value for venues".to_string())),
        }
    }

    /// Fetch one venue.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown IDs or transport/decode failures.
    #[instrument(skip(self))]
    pub async fn get(&self, id: VenueId) -> Result<Venue, ApiError> {
        let transport = &self.inner.transport;
        let value = self
            .inner
            .cache
            .get_or_load(CacheKey::Venue(id), vec![CacheTag::Venue(id)], async move {
                let venue: Venue = transport.get_json(&format!("/venues/{id}")).await?;
                Ok(CachedValue::Venue(Box::new(venue)))
            })
            .await?;
        match value {
            CachedValue::Venue(venue) => Ok(*venue),
            _ => Err(ApiError::Cache("unexpected cached value for venue".to_string())),
        }
    }

    /// Register a venue; stales the venue list on success.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty name or zero capacity, or
    /// transport/decode failures.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: &VenueDraft) -> Result<Venue, ApiError> {
        if draft.name.trim().is_empty() {
            return Err(ApiError::Validation("venue name cannot be empty".to_string()));
        }
        if draft.capacity == 0 {
            return Err(ApiError::Validation(
                "venue capacity must be positive".to_string(),
            ));
        }
        let venue: Venue = self.inner.transport.post_json("/venues", draft).await?;
        self.inner.cache.invalidate(&[CacheTag::VenueList]).await?;
        Ok(venue)
    }
}
