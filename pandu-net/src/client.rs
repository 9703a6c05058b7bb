//! HTTP client for the companion server's state endpoints.

use std::time::{Duration, Instant};

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use pandu_core::config::ResolverConfig;

use crate::error::NetError;
use crate::types::{InteractionRecord, TouchReactionResponse, WindResponse};

const INTERACTION_PATH: &str = "/state/interaction";
const WIND_PATH: &str = "/state/wind";
const API_KEY_HEADER: &str = "X-API-Key";

/// Client for `POST /state/interaction` and `GET /state/wind`.
#[derive(Debug, Clone)]
pub struct ReactionClient {
    http: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    max_retries: u32,
}

impl ReactionClient {
    /// Create a client.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration, max_retries: u32) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout,
            max_retries,
        }
    }

    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns [`NetError::Config`] if no base URL is configured.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, NetError> {
        if config.base_url.trim().is_empty() {
            return Err(NetError::Config("resolver.base_url is empty".into()));
        }
        Ok(Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            Duration::from_millis(config.timeout_ms),
            config.max_retries,
        ))
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Report a touch and get the reaction to play.
    ///
    /// A non-success status whose body still decodes as a reaction is
    /// accepted.
    ///
    /// # Errors
    /// Returns an error if every attempt failed or the body did not decode.
    pub async fn record_interaction(&self, record: &InteractionRecord) -> Result<TouchReactionResponse, NetError> {
        let body = serde_json::to_value(record)?;
        self.execute(Method::POST, INTERACTION_PATH, Some(&body), true).await
    }

    /// Fetch the wind at the companion's location.
    ///
    /// # Errors
    /// Returns an error on any non-success status or decode failure.
    pub async fn wind_state(&self) -> Result<WindResponse, NetError> {
        self.execute(Method::GET, WIND_PATH, None, false).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        decode_error_bodies: bool,
    ) -> Result<T, NetError> {
        let url = format!("{}{path}", self.base_url);
        #[allow(clippy::cast_possible_truncation)]
        let timeout_ms = self.timeout.as_millis() as u64;

        let mut last_error = String::new();
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!(attempt = attempt + 1, total = self.max_retries + 1, %url, "retrying resolver call");
            }

            let mut request = self
                .http
                .request(method.clone(), &url)
                .header(API_KEY_HEADER, &self.api_key)
                .timeout(self.timeout);
            if let Some(body) = body {
                request = request.json(body);
            }

            let start = Instant::now();
            let result = request.send().await;
            #[allow(clippy::cast_possible_truncation)]
            let latency_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(resp) => {
                    let status = resp.status();
                    let bytes = resp.bytes().await?;
                    if status.is_success() {
                        debug!(%url, latency_ms, "resolver call succeeded");
                        return serde_json::from_slice(&bytes).map_err(NetError::from);
                    }
                    if decode_error_bodies {
                        if let Ok(decoded) = serde_json::from_slice(&bytes) {
                            debug!(%url, status = status.as_u16(), "decoded non-success response");
                            return Ok(decoded);
                        }
                    }
                    last_error = describe_status(status);
                    warn!(%url, status = status.as_u16(), latency_ms, "resolver returned error");
                    if !is_retryable(status) {
                        return Err(NetError::Status {
                            status: status.as_u16(),
                        });
                    }
                }
                Err(e) if e.is_timeout() => {
                    last_error = NetError::Timeout(timeout_ms).to_string();
                    warn!(%url, timeout_ms, "resolver request timed out");
                }
                Err(e) => {
                    last_error = e.to_string();
                    warn!(%url, error = %last_error, "resolver request failed");
                }
            }
        }

        Err(NetError::RetriesExhausted {
            attempts: self.max_retries + 1,
            last_error,
        })
    }
}

fn describe_status(status: StatusCode) -> String {
    format!("HTTP {}", status.as_u16())
}

/// Server errors and throttling are worth another try; client errors are not.
fn is_retryable(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::REQUEST_TIMEOUT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_base_url_is_rejected() {
        let config = ResolverConfig::default();
        assert!(matches!(ReactionClient::from_config(&config), Err(NetError::Config(_))));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ReactionClient::new("http://pandu.local:8000/", "k", Duration::from_secs(1), 0);
        assert_eq!(client.base_url(), "http://pandu.local:8000");
    }

    #[test]
    fn retry_policy() {
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_retryable(StatusCode::UNAUTHORIZED));
        assert_eq!(describe_status(StatusCode::NOT_FOUND), "HTTP 404");
    }

    #[tokio::test]
    async fn unreachable_server_exhausts_retries() {
        // Port 9 (discard) on loopback is closed in test environments.
        let client = ReactionClient::new("http://127.0.0.1:9", "k", Duration::from_millis(200), 1);
        let record = InteractionRecord::now(
            pandu_core::BodyPart::Nose,
            pandu_core::GestureType::Tap,
            pandu_core::GestureIntensity::Moderate,
            false,
        );
        match client.record_interaction(&record).await {
            Err(NetError::RetriesExhausted { attempts, .. }) => assert_eq!(attempts, 2),
            other => panic!("expected exhausted retries, got {other:?}"),
        }
    }
}
