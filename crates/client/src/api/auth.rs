//! Authentication and profile endpoints.

use serde::{Deserialize, Serialize};
use ticketgate_core::{Email, User, UserId};
use tracing::instrument;

use crate::cache::{CacheKey, CacheTag, CachedValue};
use crate::error::ApiError;
use crate::session::SessionUser;

use super::ClientInner;

/// Credentials sent to `/auth/login`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a Email,
    password: &'a str,
}

/// Successful login/registration response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Payload for `/auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Editable profile fields for `/auth/user/{id}`.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Client for the auth domain.
pub struct AuthApi<'a> {
    inner: &'a ClientInner,
}

impl<'a> AuthApi<'a> {
    pub(super) const fn new(inner: &'a ClientInner) -> Self {
        Self { inner }
    }

    /// Log in and populate the session slice with token and identity.
    ///
    /// The response cache is wiped: anything cached before login may have
    /// been fetched as a different (or anonymous) user.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty password, `Unauthorized` for
    /// rejected credentials, or transport/decode failures.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &str) -> Result<User, ApiError> {
        if password.is_empty() {
            return Err(ApiError::Validation("password cannot be empty".to_string()));
        }

        let response: AuthResponse = self
            .inner
            .transport
            .post_json("/auth/login", &LoginRequest { email, password })
            .await?;

        self.inner
            .session
            .apply_login(response.token, SessionUser::from(&response.user))?;
        self.inner.cache.invalidate_all().await;

        Ok(response.user)
    }

    /// Register a new account. Does not log in; call [`Self::login`] after.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty password or transport failures.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        if request.password.is_empty() {
            return Err(ApiError::Validation("password cannot be empty".to_string()));
        }
        self.inner.transport.post_json("/auth/register", request).await
    }

    /// Verify the current bearer token and refresh the stored identity.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when no session token exists or the backend
    /// rejects it.
    #[instrument(skip(self))]
    pub async fn verify(&self) -> Result<User, ApiError> {
        if !self.inner.session.is_authenticated() {
            return Err(ApiError::Unauthorized("no active session".to_string()));
        }
        let user: User = self.inner.transport.get_json("/auth/verify").await?;
        self.inner.session.refresh_user(SessionUser::from(&user))?;
        Ok(user)
    }

    /// Fetch a user profile (cached under the `User` tag).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown IDs or transport/decode failures.
    #[instrument(skip(self))]
    pub async fn user(&self, id: UserId) -> Result<User, ApiError> {
        let transport = &self.inner.transport;
        let value = self
            .inner
            .cache
            .get_or_load(CacheKey::User(id), vec![CacheTag::User(id)], async move {
                let user: User = transport.get_json(&format!("/auth/user/{id}")).await?;
                Ok(CachedValue::User(Box::new(user)))
            })
            .await?;
        match value {
            CachedValue::User(user) => Ok(*user),
            _ => Err(ApiError::Cache("unexpected cached value for user".to_string())),
        }
    }

    /// Update profile fields; invalidates the cached profile on success
    /// and refreshes the session identity when editing the current user.
    ///
    /// # Errors
    ///
    /// Returns transport or decode failures.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        id: UserId,
        request: &UpdateProfileRequest,
    ) -> Result<User, ApiError> {
        let user: User = self
            .inner
            .transport
            .put_json(&format!("/auth/user/{id}"), request)
            .await?;

        self.inner.cache.invalidate(&[CacheTag::User(id)]).await?;

        if self.inner.session.current_user().is_some_and(|u| u.id == id) {
            self.inner.session.refresh_user(SessionUser::from(&user))?;
        }

        Ok(user)
    }

    /// Clear the session slice and drop every cached response.
    ///
    /// # Errors
    ///
    /// Returns an error when the session backend fails to clear.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.inner.session.logout()?;
        self.inner.cache.invalidate_all().await;
        Ok(())
    }
}
