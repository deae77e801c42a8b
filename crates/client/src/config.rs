//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TICKETGATE_API_BASE_URL` - Base URL of the ticketing REST API
//!
//! ## Optional
//! - `TICKETGATE_API_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `TICKETGATE_MAX_RETRIES` - Retry count for network failures (default: 3)
//! - `TICKETGATE_RETRY_BASE_MS` - Backoff base delay in ms (default: 250)
//! - `TICKETGATE_CACHE_TTL_SECS` - Cached response lifetime (default: 300)
//! - `TICKETGATE_CACHE_CAPACITY` - Max cached responses (default: 1000)
//! - `TICKETGATE_SESSION_FILE` - Path for the persisted session slice;
//!   the session stays in memory when unset

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Ticketgate client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the ticketing API.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry policy for transient network failures.
    pub retry: RetryConfig,
    /// Response cache tuning.
    pub cache: CacheConfig,
    /// Where to persist the session slice, if anywhere.
    pub session_file: Option<PathBuf>,
}

/// Fixed-count exponential backoff settings.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Maximum retry attempts after the initial request.
    pub max_retries: u32,
    /// Base delay; attempt `n` sleeps `base * 2^n`.
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(250),
        }
    }
}

/// Response cache settings.
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Time-to-live for cached responses.
    pub ttl: Duration,
    /// Maximum number of cached entries.
    pub capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            capacity: 1000,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or any
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_required_env("TICKETGATE_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("TICKETGATE_API_BASE_URL".to_string(), e.to_string())
            })?;

        let timeout = Duration::from_secs(parse_env_or_default(
            "TICKETGATE_API_TIMEOUT_SECS",
            30u64,
        )?);

        let retry = RetryConfig {
            max_retries: parse_env_or_default("TICKETGATE_MAX_RETRIES", 3u32)?,
            base_delay: Duration::from_millis(parse_env_or_default(
                "TICKETGATE_RETRY_BASE_MS",
                250u64,
            )?),
        };

        let cache = CacheConfig {
            ttl: Duration::from_secs(parse_env_or_default("TICKETGATE_CACHE_TTL_SECS", 300u64)?),
            capacity: parse_env_or_default("TICKETGATE_CACHE_CAPACITY", 1000u64)?,
        };

        let session_file = get_optional_env("TICKETGATE_SESSION_FILE").map(PathBuf::from);

        Ok(Self {
            base_url,
            timeout,
            retry,
            cache,
            session_file,
        })
    }

    /// Build a config for a given base URL with default tuning.
    ///
    /// Mostly useful in tests and examples.
    #[must_use]
    pub fn for_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
            cache: CacheConfig::default(),
            session_file: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse an environment variable, falling back to a default when unset.
fn parse_env_or_default<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_for_base_url_defaults() {
        let config = ApiConfig::for_base_url("http://localhost:8080/api".parse().unwrap());
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.cache.ttl, Duration::from_secs(300));
        assert!(config.session_file.is_none());
    }

    #[test]
    fn test_parse_env_or_default_uses_default_when_unset() {
        let value: u64 = parse_env_or_default("TICKETGATE_TEST_UNSET_VAR", 42u64).unwrap();
        assert_eq!(value, 42);
    }
}
