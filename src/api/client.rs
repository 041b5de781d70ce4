//! Blocking HTTP client for the Dashboard API
//!
//! Requests are authenticated with a bearer API key. Transient failures
//! (connection errors, timeouts, HTTP 429, HTTP 5xx) are retried with
//! exponential backoff until `max_retries` attempts have been made.

use std::time::Duration;

use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, RETRY_AFTER};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

use super::endpoint::Endpoint;
use super::DashboardApi;
use crate::config::Settings;
use crate::error::{NetsnapError, NetsnapResult};

/// Longest error body echoed back in messages
const MAX_ERROR_BODY: usize = 200;

/// Dashboard API client over reqwest
pub struct DashboardClient {
    http: Client,
    base_url: String,
    api_key: String,
    max_attempts: u32,
}

/// A failed attempt, with the server's requested delay if it sent one
struct AttemptFailure {
    error: NetsnapError,
    retry_after: Option<Duration>,
}

impl From<NetsnapError> for AttemptFailure {
    fn from(error: NetsnapError) -> Self {
        Self {
            error,
            retry_after: None,
        }
    }
}

impl DashboardClient {
    /// Create a client from an API key and the user's settings
    pub fn new(api_key: impl Into<String>, settings: &Settings) -> NetsnapResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(NetsnapError::Config("MERAKI_API_KEY is empty".into()));
        }
        settings.validate()?;

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(concat!("netsnap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NetsnapError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            api_key,
            max_attempts: settings.max_retries,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn send(&self, method: Method, endpoint: &Endpoint, body: Option<&Value>) -> NetsnapResult<Value> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let label = endpoint.label();
        let mut attempt = 0u32;

        let operation = || {
            attempt += 1;
            debug!(method = %method, url = %url, attempt, "Dashboard request");

            match self.send_once(method.clone(), &url, &label, body) {
                Ok(value) => Ok(value),
                Err(failure) if failure.error.is_transient() && attempt < self.max_attempts => {
                    warn!(
                        "{} {} failed on attempt {}/{}: {}",
                        method, url, attempt, self.max_attempts, failure.error
                    );
                    Err(match failure.retry_after {
                        Some(delay) => backoff::Error::retry_after(failure.error, delay),
                        None => backoff::Error::transient(failure.error),
                    })
                }
                Err(failure) => Err(backoff::Error::permanent(failure.error)),
            }
        };

        backoff::retry(backoff_policy(), operation).map_err(|e| match e {
            backoff::Error::Permanent(err) => err,
            backoff::Error::Transient { err, .. } => err,
        })
    }

    fn send_once(
        &self,
        method: Method,
        url: &str,
        label: &str,
        body: Option<&Value>,
    ) -> Result<Value, AttemptFailure> {
        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().map_err(|e| {
            NetsnapError::remote(label, e.status().map(|s| s.as_u16()), e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            let text = response
                .text()
                .map_err(|e| NetsnapError::remote(label, None, e.to_string()))?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(|e| {
                NetsnapError::remote(
                    label,
                    Some(status.as_u16()),
                    format!("invalid JSON response: {}", e),
                )
                .into()
            });
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let text = response.text().unwrap_or_default();

        Err(AttemptFailure {
            error: NetsnapError::remote(label, Some(status.as_u16()), error_message(status.as_u16(), &text)),
            retry_after,
        })
    }
}

impl DashboardApi for DashboardClient {
    fn get(&self, endpoint: &Endpoint) -> NetsnapResult<Value> {
        self.send(Method::GET, endpoint, None)
    }

    fn put(&self, endpoint: &Endpoint, body: &Value) -> NetsnapResult<Value> {
        self.send(Method::PUT, endpoint, Some(body))
    }

    fn post(&self, endpoint: &Endpoint, body: &Value) -> NetsnapResult<Value> {
        self.send(Method::POST, endpoint, Some(body))
    }
}

/// Backoff between attempts against a cloud API
fn backoff_policy() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(500))
        .with_max_interval(Duration::from_secs(10))
        .with_max_elapsed_time(Some(Duration::from_secs(60)))
        .with_multiplier(1.5)
        .build()
}

/// Extract the vendor's error list from a failed response body
///
/// The API answers errors with `{"errors": ["..."]}`; anything else is echoed
/// back truncated.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::Array(errors)) = obj.get("errors") {
            let messages: Vec<&str> = errors.iter().filter_map(Value::as_str).collect();
            if !messages.is_empty() {
                return format!("HTTP {}: {}", status, messages.join("; "));
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("HTTP {}", status);
    }
    let shortened: String = trimmed.chars().take(MAX_ERROR_BODY).collect();
    format!("HTTP {}: {}", status, shortened)
}
