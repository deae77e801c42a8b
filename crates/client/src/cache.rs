//! Tag-indexed response cache.
//!
//! Query results are cached under a [`CacheKey`] and registered against one
//! or more [`CacheTag`]s. Mutations invalidate tags instead of keys, so a
//! mutation does not need to know every parameterized query it staled -
//! creating an event drops every cached event list page in one call.
//!
//! Concurrent loads for the same key are coalesced: the second caller
//! awaits the first caller's in-flight request instead of issuing its own.
//! There is no consistency guarantee beyond latest-response-wins.

use std::sync::Arc;

use moka::future::Cache;
use ticketgate_core::{Event, EventId, Order, OrderId, Ticket, User, UserId, Venue, VenueId};
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::ApiError;

/// Key identifying one cached query result.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    EventList { page: u32, search: Option<String> },
    Event(EventId),
    FeaturedEvents,
    CategoryEvents(String),
    TicketList(UserId),
    OrderList(UserId),
    Order(OrderId),
    VenueList,
    Venue(VenueId),
    User(UserId),
    StaffAssigned(String),
    StaffScanned(String),
    OrganizerWallet(UserId),
    OrganizerRevenue(String),
    AdminSummary(String),
}

/// Label used to decide which cached entries a mutation stales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTag {
    EventList,
    Event(EventId),
    FeaturedEvents,
    CategoryEvents,
    TicketList(UserId),
    /// Umbrella over every per-user ticket list; used by mutations that
    /// cannot know whose list they staled (e.g. a gate scan).
    AnyTicketList,
    OrderList(UserId),
    Order(OrderId),
    VenueList,
    Venue(VenueId),
    User(UserId),
    StaffAssigned,
    StaffScanned,
    OrganizerStats,
    AdminSummary,
}

/// Cached value payloads, one variant per query result shape.
#[derive(Debug, Clone)]
pub enum CachedValue {
    Event(Box<Event>),
    Events(Vec<Event>),
    EventPage(crate::api::events::EventPage),
    Tickets(Vec<Ticket>),
    Orders(Vec<Order>),
    Order(Box<Order>),
    Venues(Vec<Venue>),
    Venue(Box<Venue>),
    User(Box<User>),
    AssignedEvents(Vec<Event>),
    ScannedTickets(Vec<Ticket>),
    Wallet(crate::api::admin::OrganizerWallet),
    Revenue(crate::api::admin::RevenueReport),
    Summary(crate::api::admin::AdminSummary),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: CachedValue,
    tags: Arc<Vec<CacheTag>>,
}

/// Tag-aware cache over [`moka::future::Cache`].
#[derive(Clone)]
pub struct TagCache {
    inner: Cache<CacheKey, CacheEntry>,
}

impl TagCache {
    /// Build a cache with the given capacity and TTL.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_live(config.ttl)
            .support_invalidation_closures()
            .build();
        Self { inner }
    }

    /// Serve `key` from cache or run `load`, registering `tags`.
    ///
    /// Concurrent callers for the same key share one load.
    ///
    /// # Errors
    ///
    /// Propagates the loader's error; nothing is cached on failure.
    pub async fn get_or_load<F>(
        &self,
        key: CacheKey,
        tags: Vec<CacheTag>,
        load: F,
    ) -> Result<CachedValue, ApiError>
    where
        F: Future<Output = Result<CachedValue, ApiError>>,
    {
        if let Some(entry) = self.inner.get(&key).await {
            debug!(key = ?key, "cache hit");
            return Ok(entry.value);
        }

        let tags = Arc::new(tags);
        let entry = self
            .inner
            .try_get_with(key, async move {
                let value = load.await?;
                Ok::<_, ApiError>(CacheEntry { value, tags })
            })
            .await
            .map_err(ApiError::from_shared)?;

        Ok(entry.value)
    }

    /// Drop every entry registered under any of `tags`.
    ///
    /// Pending maintenance is flushed before returning so the next read
    /// refetches instead of racing the invalidation.
    ///
    /// # Errors
    ///
    /// Returns a cache bookkeeping error if the invalidation predicate
    /// cannot be registered.
    pub async fn invalidate(&self, tags: &[CacheTag]) -> Result<(), ApiError> {
        debug!(tags = ?tags, "invalidating cache tags");
        let tags = tags.to_vec();
        self.inner
            .invalidate_entries_if(move |_key, entry| {
                entry.tags.iter().any(|t| tags.contains(t))
            })
            .map_err(|e| ApiError::Cache(e.to_string()))?;
        self.inner.run_pending_tasks().await;
        Ok(())
    }

    /// Drop everything (used on login/logout).
    pub async fn invalidate_all(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use ticketgate_core::VenueId;

    fn venue(id: i64) -> Venue {
        Venue {
            id: VenueId::new(id),
            name: "Great Hall".to_string(),
            address: "1 Main St".to_string(),
            capacity: 500,
        }
    }

    fn cache() -> TagCache {
        TagCache::new(CacheConfig::default())
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let cache = cache();
        let loads = AtomicU32::new(0);

        for _ in 0..2 {
            let value = cache
                .get_or_load(CacheKey::VenueList, vec![CacheTag::VenueList], async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(CachedValue::Venues(vec![venue(1)]))
                })
                .await
                .unwrap();
            assert!(matches!(value, CachedValue::Venues(v) if v.len() == 1));
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_tag_forces_reload() {
        let cache = cache();
        let loads = AtomicU32::new(0);

        for _ in 0..2 {
            cache
                .get_or_load(CacheKey::VenueList, vec![CacheTag::VenueList], async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(CachedValue::Venues(vec![venue(1)]))
                })
                .await
                .unwrap();

            cache.invalidate(&[CacheTag::VenueList]).await.unwrap();
        }

        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_unrelated_tag_keeps_entry() {
        let cache = cache();
        let loads = AtomicU32::new(0);

        for _ in 0..2 {
            cache
                .get_or_load(CacheKey::VenueList, vec![CacheTag::VenueList], async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(CachedValue::Venues(vec![venue(1)]))
                })
                .await
                .unwrap();

            cache.invalidate(&[CacheTag::EventList]).await.unwrap();
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_load_caches_nothing() {
        let cache = cache();
        let loads = AtomicU32::new(0);

        let result = cache
            .get_or_load(CacheKey::VenueList, vec![CacheTag::VenueList], async {
                loads.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::Api {
                    status: 500,
                    message: "boom".to_string(),
                })
            })
            .await;
        assert!(result.is_err());

        // Next read loads again.
        cache
            .get_or_load(CacheKey::VenueList, vec![CacheTag::VenueList], async {
                loads.fetch_add(1, Ordering::SeqCst);
                Ok(CachedValue::Venues(vec![venue(1)]))
            })
            .await
            .unwrap();

        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = cache();
        cache
            .get_or_load(CacheKey::VenueList, vec![CacheTag::VenueList], async {
                Ok(CachedValue::Venues(vec![venue(1)]))
            })
            .await
            .unwrap();

        cache.invalidate_all().await;

        let loads = AtomicU32::new(0);
        cache
            .get_or_load(CacheKey::VenueList, vec![CacheTag::VenueList], async {
                loads.fetch_add(1, Ordering::SeqCst);
                Ok(CachedValue::Venues(vec![venue(1)]))
            })
            .await
            .unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }
}
