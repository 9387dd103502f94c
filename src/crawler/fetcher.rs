//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with user agent and language headers
//! - GET requests returning the decoded page body
//! - Bounded retries with a fixed delay between attempts

use crate::config::{FetchConfig, UserAgentConfig};
use crate::FetchError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;

/// Source of page markup
///
/// Implementations retry transport failures themselves; callers treat a
/// returned [`FetchError`] as final.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns the response body as text
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for &F {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `fetch` - Timeout settings
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetch: &FetchConfig,
) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(&user_agent.accept_language) {
        Ok(value) => {
            headers.insert(ACCEPT_LANGUAGE, value);
        }
        Err(_) => tracing::warn!(
            value = %user_agent.accept_language,
            "Ignoring invalid accept-language header value"
        ),
    }

    Client::builder()
        .user_agent(user_agent.header_value())
        .default_headers(headers)
        .timeout(fetch.timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher over HTTP(S) with bounded retries
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_attempts: u32,
    retry_delay: Duration,
}

impl HttpFetcher {
    pub fn new(client: Client, fetch: &FetchConfig) -> Self {
        Self {
            client,
            max_attempts: fetch.max_attempts.max(1),
            retry_delay: fetch.retry_delay(),
        }
    }

    /// Builds the client and the fetcher from configuration
    pub fn from_config(
        user_agent: &UserAgentConfig,
        fetch: &FetchConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(user_agent, fetch)?, fetch))
    }

    /// One GET request; any transport error or non-success status fails
    async fn fetch_once(&self, url: &str) -> Result<String, String> {
        let response = self.client.get(url).send().await.map_err(describe)?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status.as_u16()));
        }

        response.text().await.map_err(describe)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// Fetches a URL, retrying up to the configured number of attempts
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | HTTP 2xx | Return body |
    /// | Any other status | Retry after the retry delay |
    /// | Timeout / connection error | Retry after the retry delay |
    /// | Attempts exhausted | `FetchError` with the last cause |
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut last_error = String::new();

        for attempt in 1..=self.max_attempts {
            match self.fetch_once(url).await {
                Ok(body) => {
                    tracing::trace!(url, attempt, bytes = body.len(), "Fetched");
                    return Ok(body);
                }
                Err(e) => {
                    tracing::warn!(url, attempt, error = %e, "Fetch attempt failed");
                    last_error = e;
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        Err(FetchError {
            url: url.to_string(),
            attempts: self.max_attempts,
            message: last_error,
        })
    }
}

/// Classifies a transport error for logs and the final error message
fn describe(e: reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    }
}
