//! Shared HTTP plumbing for marketplace fetchers.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{Error, Result, TransportError};

/// HTTP settings shared by every marketplace section.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum number of attempts for transient failures.
    #[serde(default = "default_http_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_http_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_http_timeout_ms() -> u64 {
    10_000
}

const fn default_http_connect_timeout_ms() -> u64 {
    3000
}

const fn default_http_retry_max_attempts() -> u32 {
    3
}

const fn default_http_retry_backoff_ms() -> u64 {
    500
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0".into()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
            retry_max_attempts: default_http_retry_max_attempts(),
            retry_backoff_ms: default_http_retry_backoff_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// GET-only client shared by the fetchers of one marketplace.
///
/// Connect failures, timeouts, `429` and `5xx` answers are retried up to
/// `retry_max_attempts` times with a linearly growing pause. Any other
/// non-success status fails at once with [`TransportError::Status`].
#[derive(Clone)]
pub struct HttpSource {
    http: HttpClient,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

/// Result of a single request attempt.
enum Attempt {
    Body(String),
    Retry(String),
    Fail(Error),
}

impl HttpSource {
    #[must_use]
    pub fn from_config(config: &HttpConfig) -> Self {
        let mut headers = HeaderMap::new();
        if let Ok(agent) = HeaderValue::from_str(&config.user_agent) {
            headers.insert(USER_AGENT, agent);
        }

        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .default_headers(headers)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            retry_max_attempts: config.retry_max_attempts.max(1),
            retry_backoff_ms: config.retry_backoff_ms,
        }
    }

    /// Response body as text.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let mut attempt = 1;
        loop {
            debug!(url, attempt, "GET");
            let reason = match self.attempt(url).await {
                Attempt::Body(body) => return Ok(body),
                Attempt::Fail(err) => return Err(err),
                Attempt::Retry(reason) => reason,
            };
            if attempt >= self.retry_max_attempts {
                return Err(TransportError::Exhausted {
                    url: url.to_string(),
                    attempts: attempt,
                    reason,
                }
                .into());
            }
            warn!(url, attempt, reason = %reason, "Request failed, retrying");
            sleep(self.pause(attempt)).await;
            attempt += 1;
        }
    }

    /// Response body decoded as JSON, whatever the declared content type.
    pub async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        let body = self.get_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn attempt(&self, url: &str) -> Attempt {
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(err) if is_transient(&err) => return Attempt::Retry(err.to_string()),
            Err(err) => return Attempt::Fail(err.into()),
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Attempt::Retry(format!("status {status}"));
        }
        if !status.is_success() {
            return Attempt::Fail(
                TransportError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                }
                .into(),
            );
        }

        match response.text().await {
            Ok(body) => Attempt::Body(body),
            Err(err) if is_transient(&err) => Attempt::Retry(err.to_string()),
            Err(err) => Attempt::Fail(err.into()),
        }
    }

    fn pause(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}
