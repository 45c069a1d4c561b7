//! Data models and processing for air quality telemetry.
//!
//! This module handles the transformation of raw feed pages into cleaned,
//! typed readings and their derived outputs.
//!
//! ## Submodules
//!
//! - [`readings`]: Cleaning and summarizing ([`ReadingSet`], [`Reading`], [`Averages`])
//! - [`alert`]: Threshold evaluation ([`Thresholds`], [`Alert`], [`check_thresholds`])
//! - [`history`]: Latest-value trends across refresh cycles for sparklines
//! - [`clock`]: Timestamp parsing and the fixed-timezone dashboard clock
//!
//! ## Data Flow
//!
//! ```text
//! FeedPage (raw JSON)
//!        │
//!        ▼
//! ReadingSet::from_feed()     rows with unparseable values dropped
//!        │
//!        ├──▶ averages()      per-field means (None when empty)
//!        │
//!        ├──▶ latest() ──▶ check_thresholds() ──▶ Vec<Alert>
//!        │
//!        └──▶ History::record() (for sparklines)
//! ```

pub mod alert;
pub mod clock;
pub mod history;
pub mod readings;

pub use alert::{check_thresholds, Alert, Field, FieldStatus, Thresholds};
pub use history::History;
pub use readings::{Averages, Reading, ReadingSet};
