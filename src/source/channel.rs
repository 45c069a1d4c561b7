//! Channel-based data source.
//!
//! Receives feed pages via a tokio watch channel. This is useful when
//! embedding the dashboard as a library and pushing pages from another
//! component rather than polling.

use tokio::sync::watch;

use super::{DataSource, FeedPage};

/// A data source that receives feed pages via a channel.
///
/// The producer sends pages through the channel and this source
/// provides them to the TUI.
///
/// # Example
///
/// ```
/// use aqwatch::ChannelSource;
///
/// // Create a channel pair
/// let (tx, source) = ChannelSource::create("simulator");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<FeedPage>,
    description: String,
    /// Track if we've returned the initial value yet
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where pages come from
    pub fn new(receiver: watch::Receiver<FeedPage>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            initial_returned: false,
        }
    }

    /// Create a channel pair for sending feed pages to a ChannelSource.
    ///
    /// Returns (sender, source) where the sender can be used to push
    /// pages and the source can be handed to the dashboard.
    pub fn create(source_description: &str) -> (watch::Sender<FeedPage>, Self) {
        let (tx, rx) = watch::channel(FeedPage::default());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<FeedPage> {
        // Return the initial value on first poll
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        // Check if there's a new value without blocking
        if self.receiver.has_changed().unwrap_or(false) {
            let page = self.receiver.borrow_and_update().clone();
            Some(page)
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        // Channel sources don't fetch; delivery errors belong to the producer
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FeedEntry;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        // Initially returns the default (empty) page
        let page = source.poll();
        assert!(page.is_some());
        assert!(page.unwrap().feeds.is_empty());

        // No change, so poll returns None
        assert!(source.poll().is_none());

        // Send a new page
        let new_page = FeedPage {
            channel: None,
            feeds: vec![FeedEntry {
                created_at: "2024-10-10T08:15:30Z".to_string(),
                ..FeedEntry::default()
            }],
        };
        tx.send(new_page).unwrap();

        // Now poll returns the new page
        let page = source.poll();
        assert!(page.is_some());
        assert_eq!(page.unwrap().feeds.len(), 1);
    }
}
