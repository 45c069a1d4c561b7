//! ThingSpeak feeds API client.
//!
//! Performs the single outbound HTTP call of a dashboard cycle:
//! `GET {base}/channels/{channel_id}/feeds.json?api_key={key}&results={n}`.
//! One request per cycle, no retries; failures are typed and surfaced to
//! the caller.
//!
//! ## Example
//!
//! ```rust,no_run
//! use aqwatch::ThingSpeakClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ThingSpeakClient::builder()
//!         .channel("2662816")
//!         .api_key("XXXXXXXXXXXXXXXX")
//!         .results(1000)
//!         .build();
//!
//!     let page = client.fetch_feed().await?;
//!     println!("fetched {} entries", page.feeds.len());
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::source::FeedPage;

/// Default feeds API host.
pub const DEFAULT_BASE_URL: &str = "https://api.thingspeak.com";

/// Default number of records requested per fetch.
pub const DEFAULT_RESULTS: u32 = 1000;

/// Errors that can occur when fetching the channel feed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The API rejected the key (or the channel is private).
    #[error("Authorization failed: {0}")]
    Auth(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

/// Client for one ThingSpeak channel's feed endpoint.
#[derive(Debug, Clone)]
pub struct ThingSpeakClient {
    client: Client,
    base_url: String,
    channel_id: String,
    api_key: Option<String>,
    results: u32,
}

impl ThingSpeakClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> ThingSpeakClientBuilder {
        ThingSpeakClientBuilder::default()
    }

    /// The channel this client fetches.
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    fn feed_url(&self) -> String {
        format!(
            "{}/channels/{}/feeds.json",
            self.base_url.trim_end_matches('/'),
            self.channel_id
        )
    }

    /// Fetch one page of feed entries for the configured channel.
    pub async fn fetch_feed(&self) -> Result<FeedPage, FetchError> {
        let url = self.feed_url();
        debug!(%url, results = self.results, "fetching channel feed");

        let mut request = self
            .client
            .get(&url)
            .query(&[("results", self.results.to_string())]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("api_key", key.as_str())]);
        }

        let response = request.send().await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            || response.status() == reqwest::StatusCode::BAD_REQUEST
        {
            return Err(FetchError::Auth(
                "Invalid API key or private channel".to_string(),
            ));
        }

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::Http(format!(
                "Channel '{}' not found",
                self.channel_id
            )));
        }

        if !response.status().is_success() {
            return Err(FetchError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let page: FeedPage = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(page)
    }
}

/// Builder for ThingSpeakClient.
#[derive(Debug, Default)]
pub struct ThingSpeakClientBuilder {
    base_url: Option<String>,
    channel_id: Option<String>,
    api_key: Option<String>,
    results: Option<u32>,
    timeout: Option<Duration>,
}

impl ThingSpeakClientBuilder {
    /// Set the channel ID to fetch.
    pub fn channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }

    /// Set the read API key (not needed for public channels).
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the number of records to request (default: 1000).
    pub fn results(mut self, results: u32) -> Self {
        self.results = Some(results);
        self
    }

    /// Override the API host (e.g. for a self-hosted instance).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> ThingSpeakClient {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        ThingSpeakClient {
            client,
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            channel_id: self.channel_id.unwrap_or_default(),
            api_key: self.api_key,
            results: self.results.unwrap_or(DEFAULT_RESULTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = ThingSpeakClient::builder().channel("2662816").build();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.channel_id(), "2662816");
        assert!(client.api_key.is_none());
        assert_eq!(client.results, DEFAULT_RESULTS);
    }

    #[test]
    fn test_builder_custom() {
        let client = ThingSpeakClient::builder()
            .channel("42")
            .api_key("SECRETKEY")
            .results(50)
            .base_url("http://thingspeak.local:3000/")
            .build();

        assert_eq!(client.channel_id(), "42");
        assert_eq!(client.api_key.as_deref(), Some("SECRETKEY"));
        assert_eq!(client.results, 50);
        // Trailing slash on the base URL must not double up in the path.
        assert_eq!(
            client.feed_url(),
            "http://thingspeak.local:3000/channels/42/feeds.json"
        );
    }

    #[test]
    fn test_feed_url() {
        let client = ThingSpeakClient::builder().channel("2662816").build();
        assert_eq!(
            client.feed_url(),
            "https://api.thingspeak.com/channels/2662816/feeds.json"
        );
    }
}
