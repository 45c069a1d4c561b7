//! Data source abstraction for receiving feed pages.
//!
//! This module provides a trait-based abstraction for receiving raw
//! telemetry from various sources (HTTP polling, files, in-memory
//! channels).

mod channel;
mod feed;
mod file;
mod http;

pub use channel::ChannelSource;
pub use feed::{ChannelInfo, FeedEntry, FeedPage};
pub use file::FileSource;
pub use http::HttpSource;

use std::fmt::Debug;

/// Trait for receiving feed pages from various backends.
///
/// Implementations provide raw feed pages from different backends -
/// interval HTTP polling, file polling, or in-memory channels.
///
/// # Example
///
/// ```
/// use aqwatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("feeds.json");
/// if let Some(page) = source.poll() {
///     println!("Got {} entries", page.feeds.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest feed page.
    ///
    /// Returns `Some(page)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<FeedPage>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// The error from the most recent fetch attempt, if it failed.
    ///
    /// Owned so that sources updating their error state from a background
    /// task can report through the trait.
    fn error(&self) -> Option<String>;
}
