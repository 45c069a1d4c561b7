//! HTTP polling data source.
//!
//! Fetches the channel feed from the telemetry provider on a fixed
//! interval in a background task and makes pages available via `poll()`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{DataSource, FeedPage};
use crate::fetch::ThingSpeakClient;

/// A data source that polls the feeds API on an interval.
///
/// Each successful fetch replaces the previous page wholesale; there is
/// no merging or incremental update. Fetch failures are kept in an error
/// slot shared with the background task and surfaced through
/// [`DataSource::error`].
#[derive(Debug)]
pub struct HttpSource {
    receiver: mpsc::Receiver<FeedPage>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
}

impl HttpSource {
    /// Spawn a background task fetching the feed every `interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(client: ThingSpeakClient, interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(4);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();
        let description = format!("thingspeak: channel {}", client.channel_id());

        tokio::spawn(async move {
            loop {
                match client.fetch_feed().await {
                    Ok(page) => {
                        debug!(entries = page.feeds.len(), "fetched feed page");
                        *error_handle.lock().unwrap() = None;
                        if tx.send(page).await.is_err() {
                            // Receiver dropped
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("feed fetch failed: {}", e);
                        *error_handle.lock().unwrap() = Some(e.to_string());
                    }
                }

                tokio::time::sleep(interval).await;
            }
        });

        Self {
            receiver: rx,
            description,
            last_error,
        }
    }
}

impl DataSource for HttpSource {
    fn poll(&mut self) -> Option<FeedPage> {
        match self.receiver.try_recv() {
            Ok(page) => Some(page),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                *self.last_error.lock().unwrap() = Some("Fetch task stopped".to_string());
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::ThingSpeakClient;

    #[tokio::test]
    async fn test_http_source_description() {
        let client = ThingSpeakClient::builder().channel("2662816").build();
        let source = HttpSource::spawn(client, Duration::from_secs(60));
        assert_eq!(source.description(), "thingspeak: channel 2662816");
    }

    #[tokio::test]
    async fn test_http_source_surfaces_fetch_errors() {
        // Nothing listens on this port, so the first fetch fails fast.
        let client = ThingSpeakClient::builder()
            .channel("1")
            .base_url("http://127.0.0.1:1")
            .build();
        let mut source = HttpSource::spawn(client, Duration::from_secs(60));

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(source.poll().is_none());
        assert!(source.error().is_some());
    }
}
