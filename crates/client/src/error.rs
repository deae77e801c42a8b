//! Client error types.
//!
//! Errors fall into the three categories the UI layer distinguishes:
//! client-side validation failures, transient network failures (retried by
//! the transport up to a fixed count), and application errors (4xx/5xx
//! responses surfaced with the backend-provided message). Nothing here
//! escalates to a panic; every failure degrades to a value the caller can
//! render.

use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur when talking to the ticketing API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure (connection, timeout, TLS). The retryable class.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Application error: the backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded into the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or rejected credentials (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limited by the backend; retry after the given seconds.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Client-side input validation failure; never sent to the backend.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Session slice could not be loaded or persisted.
    #[error("Session error: {0}")]
    Session(String),

    /// Cache bookkeeping failure.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Error produced by a coalesced in-flight request shared with another
    /// caller.
    #[error(transparent)]
    Shared(Arc<ApiError>),
}

impl ApiError {
    /// Unwrap a coalesced-load error back into a plain `ApiError`.
    ///
    /// The cache shares one loader result between concurrent callers; the
    /// last caller holding the `Arc` recovers the original error, the rest
    /// see it through [`ApiError::Shared`].
    #[must_use]
    pub fn from_shared(err: Arc<Self>) -> Self {
        Arc::try_unwrap(err).unwrap_or_else(Self::Shared)
    }

    /// Whether this error came from the network layer (the class the
    /// transport retries) rather than from the application.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Backend-provided message, or a generic fallback for display.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::Api { .. } => "Something went wrong, please try again".to_string(),
            Self::Shared(inner) => inner.display_message(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Api {
            status: 422,
            message: "quantity exceeds availability".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (422): quantity exceeds availability"
        );
    }

    #[test]
    fn test_display_message_fallback() {
        let err = ApiError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.display_message(), "Something went wrong, please try again");
    }

    #[test]
    fn test_transient_classification() {
        assert!(!ApiError::NotFound("event 9".to_string()).is_transient());
        assert!(
            !ApiError::Api {
                status: 500,
                message: "boom".to_string()
            }
            .is_transient()
        );
    }

    #[test]
    fn test_from_shared_unwraps_sole_owner() {
        let arc = Arc::new(ApiError::RateLimited(2));
        assert!(matches!(
            ApiError::from_shared(arc),
            ApiError::RateLimited(2)
        ));
    }

    #[test]
    fn test_from_shared_keeps_shared_owner() {
        let arc = Arc::new(ApiError::RateLimited(2));
        let _keep = Arc::clone(&arc);
        assert!(matches!(ApiError::from_shared(arc), ApiError::Shared(_)));
    }
}
