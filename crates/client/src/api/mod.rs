//! Per-domain API clients.
//!
//! One module per backend domain. Reads go through the tag cache; each
//! declares the tags it registers under. Mutations bypass the cache and
//! invalidate their declared tags on success - and only on success, so a
//! failed mutation leaves cached reads untouched.

pub mod admin;
pub mod auth;
pub mod events;
pub mod orders;
pub mod staff;
pub mod tickets;
pub mod venues;

use std::sync::Arc;

use crate::cache::TagCache;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::HttpTransport;
use crate::session::SessionStore;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use events::EventsApi;
pub use orders::OrdersApi;
pub use staff::StaffApi;
pub use tickets::TicketsApi;
pub use venues::VenuesApi;

/// Client for the Ticketgate REST API.
///
/// Cheap to clone; all clones share the transport, session store, and
/// response cache.
#[derive(Clone)]
pub struct TicketgateClient {
    inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) transport: HttpTransport,
    pub(crate) cache: TagCache,
    pub(crate) session: SessionStore,
}

impl TicketgateClient {
    /// Build a client from config and a session store reference.
    ///
    /// The session store is shared, not owned: the caller keeps using the
    /// same handle for guards and login state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport fails to build.
    pub fn new(config: &ApiConfig, session: &SessionStore) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(config, session)?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                transport,
                cache: TagCache::new(config.cache),
                session: session.clone(),
            }),
        })
    }

    /// Authentication and profile operations.
    #[must_use]
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.inner)
    }

    /// Event catalog operations.
    #[must_use]
    pub fn events(&self) -> EventsApi<'_> {
        EventsApi::new(&self.inner)
    }

    /// Ticket operations (attendee lists, gate scans).
    #[must_use]
    pub fn tickets(&self) -> TicketsApi<'_> {
        TicketsApi::new(&self.inner)
    }

    /// Checkout and order history.
    #[must_use]
    pub fn orders(&self) -> OrdersApi<'_> {
        OrdersApi::new(&self.inner)
    }

    /// Venue catalog operations.
    #[must_use]
    pub fn venues(&self) -> VenuesApi<'_> {
        VenuesApi::new(&self.inner)
    }

    /// Check-in staff operations.
    #[must_use]
    pub fn staff(&self) -> StaffApi<'_> {
        StaffApi::new(&self.inner)
    }

    /// Organizer/admin analytics.
    #[must_use]
    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(&self.inner)
    }

    /// The session store this client reads its bearer token from.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }
}
