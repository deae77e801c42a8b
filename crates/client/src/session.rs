//! Persisted session state.
//!
//! The session slice is the client-side record of the authenticated user:
//! bearer token plus minimal identity. It is an explicit store object
//! passed by reference into [`crate::TicketgateClient`], with explicit
//! load/save hooks - there is no ambient global. Persistence goes through
//! a [`SessionBackend`]; the file backend is the headless stand-in for the
//! browser's local storage and carries a schema version for migration.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use ticketgate_core::{Email, Role, User, UserId};
use tracing::{debug, warn};

use crate::error::ApiError;

/// Current schema version of the persisted slice.
///
/// v0 predates the `version` field (token + user only); v1 added it.
/// Unknown future versions load as an anonymous slice rather than failing.
pub const CURRENT_VERSION: u32 = 1;

/// Minimal identity kept in the session after login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub email: Email,
    pub role: Role,
    pub display_name: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            display_name: user.display_name(),
        }
    }
}

/// The serializable session record.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSlice {
    #[serde(default)]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

impl SessionSlice {
    /// An anonymous slice at the current schema version.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            version: CURRENT_VERSION,
            token: None,
            user: None,
        }
    }

    /// Deserialize a persisted slice, migrating older schema versions.
    #[must_use]
    pub fn migrate(raw: &str) -> Self {
        let Ok(mut slice) = serde_json::from_str::<Self>(raw) else {
            warn!("session slice unreadable, starting anonymous");
            return Self::anonymous();
        };

        match slice.version {
            0 => {
                // v0 lacked the version field; fields are otherwise identical.
                debug!("migrating session slice v0 -> v{CURRENT_VERSION}");
                slice.version = CURRENT_VERSION;
                slice
            }
            CURRENT_VERSION => slice,
            newer => {
                warn!(version = newer, "session slice from a newer client, ignoring");
                Self::anonymous()
            }
        }
    }
}

/// Storage hook for the session slice.
pub trait SessionBackend: Send + Sync {
    /// Load the raw persisted slice, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage medium fails; a missing slice is
    /// `Ok(None)`.
    fn load(&self) -> Result<Option<String>, ApiError>;

    /// Persist the raw slice.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage medium fails.
    fn save(&self, raw: &str) -> Result<(), ApiError>;

    /// Remove the persisted slice.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage medium fails.
    fn clear(&self) -> Result<(), ApiError>;
}

/// Keeps the slice in memory only; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryBackend;

impl SessionBackend for MemoryBackend {
    fn load(&self) -> Result<Option<String>, ApiError> {
        Ok(None)
    }

    fn save(&self, _raw: &str) -> Result<(), ApiError> {
        Ok(())
    }

    fn clear(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

/// JSON file persistence for the session slice.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionBackend for FileBackend {
    fn load(&self) -> Result<Option<String>, ApiError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ApiError::Session(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, raw: &str) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::Session(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        std::fs::write(&self.path, raw).map_err(|e| {
            ApiError::Session(format!("failed to write {}: {e}", self.path.display()))
        })
    }

    fn clear(&self) -> Result<(), ApiError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Session(format!(
                "failed to remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// Thread-safe session store shared between the transport and callers.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    slice: RwLock<SessionSlice>,
    backend: Box<dyn SessionBackend>,
}

impl SessionStore {
    /// Create a store over the given backend, loading any persisted slice.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fails to load.
    pub fn new(backend: Box<dyn SessionBackend>) -> Result<Self, ApiError> {
        let slice = match backend.load()? {
            Some(raw) => SessionSlice::migrate(&raw),
            None => SessionSlice::anonymous(),
        };
        Ok(Self {
            inner: Arc::new(SessionStoreInner {
                slice: RwLock::new(slice),
                backend,
            }),
        })
    }

    /// In-memory store with no persistence.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                slice: RwLock::new(SessionSlice::anonymous()),
                backend: Box::new(MemoryBackend),
            }),
        }
    }

    /// File-backed store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read.
    pub fn with_file(path: PathBuf) -> Result<Self, ApiError> {
        Self::new(Box::new(FileBackend::new(path)))
    }

    /// Record a successful login and persist the slice.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting fails; the in-memory slice is
    /// updated regardless so the current process stays logged in.
    pub fn apply_login(&self, token: String, user: SessionUser) -> Result<(), ApiError> {
        let raw = {
            let mut slice = self.write_slice();
            slice.token = Some(token);
            slice.user = Some(user);
            slice.version = CURRENT_VERSION;
            serde_json::to_string(&*slice)?
        };
        self.inner.backend.save(&raw)
    }

    /// Refresh the stored identity (e.g. after a profile edit or verify).
    ///
    /// No-op when nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting fails.
    pub fn refresh_user(&self, user: SessionUser) -> Result<(), ApiError> {
        let raw = {
            let mut slice = self.write_slice();
            if slice.token.is_none() {
                return Ok(());
            }
            slice.user = Some(user);
            serde_json::to_string(&*slice)?
        };
        self.inner.backend.save(&raw)
    }

    /// Clear token and identity, and remove the persisted slice.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fails to clear.
    pub fn logout(&self) -> Result<(), ApiError> {
        {
            let mut slice = self.write_slice();
            *slice = SessionSlice::anonymous();
        }
        self.inner.backend.clear()
    }

    /// Bearer token for the current session, if authenticated.
    #[must_use]
    pub fn bearer_token(&self) -> Option<SecretString> {
        self.read_slice()
            .token
            .as_deref()
            .map(SecretString::from)
    }

    /// Identity of the current user, if authenticated.
    #[must_use]
    pub fn current_user(&self) -> Option<SessionUser> {
        self.read_slice().user.clone()
    }

    /// Role of the current user, if authenticated.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.read_slice().user.as_ref().map(|u| u.role)
    }

    /// Whether a bearer token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_slice().token.is_some()
    }

    /// Snapshot of the slice, mostly for diagnostics.
    #[must_use]
    pub fn snapshot(&self) -> SessionSlice {
        self.read_slice().clone()
    }

    fn read_slice(&self) -> std::sync::RwLockReadGuard<'_, SessionSlice> {
        // Lock poisoning only happens if a writer panicked; the slice is
        // plain data, so the previous value is still usable.
        self.inner
            .slice
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_slice(&self) -> std::sync::RwLockWriteGuard<'_, SessionSlice> {
        self.inner
            .slice
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn test_user() -> SessionUser {
        SessionUser {
            id: UserId::new(7),
            email: Email::parse("ada@example.com").unwrap(),
            role: Role::Organizer,
            display_name: "Ada Lovelace".to_string(),
        }
    }

    #[test]
    fn test_login_populates_token_and_role() {
        let store = SessionStore::in_memory();
        assert!(!store.is_authenticated());

        store
            .apply_login("tok-123".to_string(), test_user())
            .unwrap();

        assert!(store.is_authenticated());
        assert_eq!(
            store.bearer_token().unwrap().expose_secret(),
            "tok-123"
        );
        assert_eq!(store.role(), Some(Role::Organizer));
    }

    #[test]
    fn test_logout_clears_token_and_role() {
        let store = SessionStore::in_memory();
        store
            .apply_login("tok-123".to_string(), test_user())
            .unwrap();

        store.logout().unwrap();

        assert!(!store.is_authenticated());
        assert!(store.bearer_token().is_none());
        assert!(store.role().is_none());
    }

    #[test]
    fn test_refresh_user_requires_login() {
        let store = SessionStore::in_memory();
        store.refresh_user(test_user()).unwrap();
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_migrate_v0_slice() {
        // v0 had no version field.
        let raw = r#"{"token":"tok","user":{"id":1,"email":"a@b.c","role":"staff","displayName":"A B"}}"#;
        let slice = SessionSlice::migrate(raw);
        assert_eq!(slice.version, CURRENT_VERSION);
        assert_eq!(slice.token.as_deref(), Some("tok"));
        assert_eq!(slice.user.unwrap().role, Role::Staff);
    }

    #[test]
    fn test_migrate_newer_version_resets() {
        let raw = r#"{"version":99,"token":"tok"}"#;
        let slice = SessionSlice::migrate(raw);
        assert_eq!(slice, SessionSlice::anonymous());
    }

    #[test]
    fn test_migrate_garbage_resets() {
        assert_eq!(SessionSlice::migrate("not json"), SessionSlice::anonymous());
    }

    #[test]
    fn test_file_backend_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::with_file(path.clone()).unwrap();
        store.apply_login("tok-xyz".to_string(), test_user()).unwrap();

        // A second store over the same file sees the persisted session.
        let reloaded = SessionStore::with_file(path.clone()).unwrap();
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.role(), Some(Role::Organizer));

        // Logout removes the file.
        reloaded.logout().unwrap();
        assert!(!path.exists());
    }
}
