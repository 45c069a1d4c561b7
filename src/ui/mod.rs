//! Terminal UI rendering using ratatui.
//!
//! This module contains all the view-specific rendering logic for the TUI.
//!
//! ## Submodules
//!
//! - [`chart`]: Line chart of one field over the fetched window
//! - [`averages`]: Bar chart of per-field means
//! - [`data`]: Modal overlay with the cleaned reading table
//! - [`common`]: Shared chrome (header, tabs, metrics, alerts, status bar, help)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! The main loop in `main.rs` calls into these modules based on the current view:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │ Metrics (common::render_metrics)     │
//! ├──────────────────────────────────────┤
//! │ Alerts (common::render_alerts)       │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (chart/averages::render)             │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//! ```

pub mod averages;
pub mod chart;
pub mod common;
pub mod data;
pub mod theme;

pub use theme::Theme;
