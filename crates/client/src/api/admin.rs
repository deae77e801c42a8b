//! Organizer and admin analytics endpoints.

use serde::{Deserialize, Serialize};
use ticketgate_core::{Email, EventId, Price, UserId};
use tracing::instrument;

use crate::cache::{CacheKey, CacheTag, CachedValue};
use crate::error::ApiError;

use super::ClientInner;

/// Organizer wallet balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerWallet {
    pub user_id: UserId,
    pub balance: Price,
    pub pending: Price,
}

/// Revenue attributed to one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRevenue {
    pub event_id: EventId,
    pub title: String,
    pub tickets_sold: u32,
    pub revenue: Price,
}

/// Organizer revenue report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReport {
    pub gross: Price,
    pub net: Price,
    pub orders_count: u64,
    pub per_event: Vec<EventRevenue>,
}

/// Platform-wide dashboard numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub users_count: u64,
    pub events_count: u64,
    pub orders_count: u64,
    pub tickets_scanned: u64,
    pub gross_revenue: Price,
}

/// Client for analytics endpoints.
pub struct AdminApi<'a> {
    inner: &'a ClientInner,
}

impl<'a> AdminApi<'a> {
    pub(super) const fn new(inner: &'a ClientInner) -> Self {
        Self { inner }
    }

    /// Wallet balances for an organizer.
    ///
    /// # Errors
    ///
    /// Returns transport or decode failures.
    #[instrument(skip(self))]
    pub async fn organizer_wallet(&self, user_id: UserId) -> Result<OrganizerWallet, ApiError> {
        let transport = &self.inner.transport;
        let value = self
            .inner
            .cache
            .get_or_load(
                CacheKey::OrganizerWallet(user_id),
                vec![CacheTag::OrganizerStats],
                async move {
                    let wallet: OrganizerWallet = transport
                        .get_json(&format!("/organizer/wallet/{user_id}"))
                        .await?;
                    Ok(CachedValue::Wallet(wallet))
                },
            )
            .await?;
        match value {
            CachedValue::Wallet(wallet) => Ok(wallet),
            _ => Err(ApiError::Cache("unexpected cached value for wallet".to_string())),
        }
    }

    /// Revenue report for an organizer.
    ///
    /// # Errors
    ///
    /// Returns transport or decode failures.
    #[instrument(skip(self))]
    pub async fn organizer_revenue(&self, email: &Email) -> Result<RevenueReport, ApiError> {
        let transport = &self.inner.transport;
        let path = format!(
            "/organizer/revenue/{}",
            urlencoding::encode(email.as_str())
        );
        let value = self
            .inner
            .cache
            .get_or_load(
                CacheKey::OrganizerRevenue(email.as_str().to_string()),
                vec![CacheTag::OrganizerStats],
                async move {
                    let report: RevenueReport = transport.get_json(&path).await?;
                    Ok(CachedValue::Revenue(report))
                },
            )
            .await?;
        match value {
            CachedValue::Revenue(report) => Ok(report),
            _ => Err(ApiError::Cache("unexpected cached value for revenue".to_string())),
        }
    }

    /// Platform summary for the admin dashboard.
    ///
    /// Skip-aware: `None` (admin email not yet known) issues no request.
    ///
    /// # Errors
    ///
    /// Returns transport or decode failures.
    #[instrument(skip(self))]
    pub async fn summary(&self, email: Option<&Email>) -> Result<Option<AdminSummary>, ApiError> {
        let Some(email) = email else {
            return Ok(None);
        };

        let transport = &self.inner.transport;
        let path = format!("/admin/summary/{}", urlencoding::encode(email.as_str()));
        let value = self
            .inner
            .cache
            .get_or_load(
                CacheKey::AdminSummary(email.as_str().to_string()),
                vec![CacheTag::AdminSummary],
                async move {
                    let summary: AdminSummary = transport.get_json(&path).await?;
                    Ok(CachedValue::Summary(summary))
                },
            )
            .await?;
        match value {
            CachedValue::Summary(summary) => Ok(Some(summary)),
            _ => Err(ApiError::Cache("unexpected cached value for summary".to_string())),
        }
    }
}
