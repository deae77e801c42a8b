//! HTTP transport shared by the per-domain clients.
//!
//! Owns the `reqwest` client, injects the bearer header from the session
//! store on every request, and applies a fixed-count exponential backoff
//! to network-level failures. Application errors (4xx/5xx) are mapped to
//! [`ApiError`] variants and surfaced immediately - the backend already
//! answered, so retrying would not help and could repeat a mutation.

use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use url::Url;

use crate::config::{ApiConfig, RetryConfig};
use crate::error::ApiError;
use crate::session::SessionStore;

/// Error envelope the backend uses for non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Transport over the ticketing REST API.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    session: SessionStore,
    retry: RetryConfig,
}

impl HttpTransport {
    /// Build a transport from config and a session store reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: &ApiConfig, session: &SessionStore) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        // Normalize to a trailing slash so Url::join appends instead of
        // replacing the last path segment.
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            session: session.clone(),
            retry: config.retry,
        })
    }

    /// GET `path` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error for network failures (after retries), non-success
    /// statuses, or response decode failures.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_json(Method::GET, path, None::<&()>).await
    }

    /// GET `path` with query parameters and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get_json`].
    pub async fn get_json_with_query<Q: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let url = self.url_for(path)?;
        let request = self.authorize(self.client.get(url.clone())).query(query);
        self.execute(request, &url).await
    }

    /// POST a JSON `body` to `path` and decode the response.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get_json`].
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request_json(Method::POST, path, Some(body)).await
    }

    /// PUT a JSON `body` to `path` and decode the response.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get_json`].
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request_json(Method::PUT, path, Some(body)).await
    }

    async fn request_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let url = self.url_for(path)?;
        let mut request = self.authorize(self.client.request(method, url.clone()));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request, &url).await
    }

    fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Validation(format!("invalid request path {path}: {e}")))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        // Bearer header only when a session token exists.
        match self.session.bearer_token() {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Send with retry, then map the response.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> Result<T, ApiError> {
        let mut attempt: u32 = 0;
        let response = loop {
            let Some(request) = request.try_clone() else {
                // Streaming bodies cannot be cloned; send once without retry.
                break request.send().await?;
            };
            match request.send().await {
                Ok(response) => break response,
                Err(e) if attempt < self.retry.max_retries => {
                    let delay = self.retry.base_delay * 2u32.saturating_pow(attempt);
                    warn!(
                        url = %url,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "transient network failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(ApiError::Http(e)),
            }
        };

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        // Body as text first for better error diagnostics.
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map_or_else(|_| body.trim().to_string(), |e| e.message);
            debug!(url = %url, status = %status, "API error response");
            return Err(match status {
                StatusCode::NOT_FOUND => ApiError::NotFound(message),
                StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
                _ => ApiError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(
                url = %url,
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to decode API response"
            );
            ApiError::Parse(e)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    fn transport(base: &str) -> HttpTransport {
        let config = ApiConfig::for_base_url(base.parse().unwrap());
        HttpTransport::new(&config, &SessionStore::in_memory()).unwrap()
    }

    #[test]
    fn test_url_for_appends_to_base_path() {
        let t = transport("http://localhost:8080/api/v1");
        assert_eq!(
            t.url_for("/events/featured").unwrap().as_str(),
            "http://localhost:8080/api/v1/events/featured"
        );
    }

    #[test]
    fn test_url_for_plain_host_base() {
        let t = transport("http://localhost:8080");
        assert_eq!(
            t.url_for("auth/login").unwrap().as_str(),
            "http://localhost:8080/auth/login"
        );
    }
}
