// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # aqwatch
//!
//! A terminal dashboard and library for monitoring air quality telemetry
//! from ThingSpeak channels.
//!
//! Each cycle fetches a window of raw feed entries, cleans them into a
//! typed reading table, computes per-field averages, checks the most
//! recent reading against fixed alert thresholds, and renders the result
//! in an interactive terminal UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(cleaning/│    │(charts) │    │         │ │
//! │  └────┬────┘    │ alerts)  │    └─────────┘    └─────────┘ │
//! │       │         └──────────┘                                │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | FileSource | ChannelSource    │
//! │  │ (input) │         │                                      │
//! │  └─────────┘         └── fetch (ThingSpeakClient)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and the
//!   clean/summarize/alert pipeline run on every poll
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with
//!   implementations for interval HTTP polling, file polling, and
//!   channel-based input
//! - **[`fetch`]**: The ThingSpeak feeds API client used by the HTTP source
//! - **[`data`]**: Cleaning of raw entries into [`ReadingSet`], per-field
//!   averages, threshold alerts, and trend history for sparklines
//! - **[`ui`]**: Terminal rendering using ratatui - field charts, averages
//!   bar chart, metrics row, alert banners, and theme support
//! - **[`settings`]**: Layered settings (file, environment, CLI)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll a ThingSpeak channel
//! aqwatch --channel 2662816 --api-key XXXXXXXXXXXXXXXX
//!
//! # Inspect a saved feed export
//! aqwatch --file feeds.json
//! ```
//!
//! ### As a library with a file source
//!
//! ```
//! use aqwatch::{App, FileSource, Thresholds};
//!
//! let source = Box::new(FileSource::new("feeds.json"));
//! let app = App::new(source, Thresholds::default());
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use aqwatch::{App, ChannelSource, Thresholds};
//!
//! // Create a channel for pushing feed pages
//! let (tx, source) = ChannelSource::create("simulator");
//!
//! // Create the app
//! let app = App::new(Box::new(source), Thresholds::default());
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod fetch;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, ChartSpec, View};
pub use settings::Settings;
pub use data::{
    check_thresholds, Alert, Averages, Field, FieldStatus, History, Reading, ReadingSet,
    Thresholds,
};
pub use fetch::{FetchError, ThingSpeakClient};
pub use source::{
    ChannelInfo, ChannelSource, DataSource, FeedEntry, FeedPage, FileSource, HttpSource,
};
