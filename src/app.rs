//! Application state and navigation logic.

use anyhow::Result;

use crate::data::{check_thresholds, Alert, Field, History, ReadingSet, Thresholds};
use crate::source::{DataSource, FeedPage};
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// The cleaned-readings table is shown as an overlay (controlled by
/// `App::show_data_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Gas concentration over the fetched window.
    Gas,
    /// Temperature over the fetched window.
    Temperature,
    /// Humidity over the fetched window.
    Humidity,
    /// Bar chart of per-field averages.
    Averages,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Gas => View::Temperature,
            View::Temperature => View::Humidity,
            View::Humidity => View::Averages,
            View::Averages => View::Gas,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Gas => View::Averages,
            View::Temperature => View::Gas,
            View::Humidity => View::Temperature,
            View::Averages => View::Humidity,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Gas => "Gas",
            View::Temperature => "Temperature",
            View::Humidity => "Humidity",
            View::Averages => "Averages",
        }
    }

    /// The line-chart description for this view, or `None` for the
    /// averages bar chart.
    pub fn chart_spec(self) -> Option<ChartSpec> {
        match self {
            View::Gas => Some(ChartSpec {
                field: Field::Gas,
                title: "Gas Concentration Over Time",
                y_label: "Concentration (ppm)",
            }),
            View::Temperature => Some(ChartSpec {
                field: Field::Temperature,
                title: "Temperature Over Time",
                y_label: "Temperature (°C)",
            }),
            View::Humidity => Some(ChartSpec {
                field: Field::Humidity,
                title: "Humidity Over Time",
                y_label: "Humidity (%)",
            }),
            View::Averages => None,
        }
    }
}

/// Field, title and axis label backing one line-chart view.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    pub field: Field,
    pub title: &'static str,
    pub y_label: &'static str,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_data_overlay: bool,
    /// Scroll offset into the readings table overlay.
    pub data_scroll: usize,

    // Data source
    source: Box<dyn DataSource>,
    pub data: Option<ReadingSet>,
    pub history: History,
    pub load_error: Option<String>,
    pub thresholds: Thresholds,
    /// Alerts for the latest reading of the current data.
    pub alerts: Vec<Alert>,
    /// Channel name (or id) from the feed's metadata block.
    pub channel_name: Option<String>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, std::time::Instant)>,
}

impl App {
    /// Create a new App with the given data source and thresholds.
    pub fn new(source: Box<dyn DataSource>, thresholds: Thresholds) -> Self {
        Self {
            running: true,
            current_view: View::Gas,
            show_help: false,
            show_data_overlay: false,
            data_scroll: 0,
            source,
            data: None,
            history: History::new(),
            load_error: None,
            thresholds,
            alerts: Vec::new(),
            channel_name: None,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, std::time::Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source and run the cleaning/alerting pipeline.
    ///
    /// Returns Ok(true) if new data was received, Ok(false) if no new data,
    /// or Err if there was an error.
    pub fn reload_data(&mut self) -> Result<bool> {
        // Check for errors from the source
        if let Some(err) = self.source.error() {
            self.load_error = Some(err);
            return Ok(false);
        }

        // Poll for a new feed page
        if let Some(page) = self.source.poll() {
            let FeedPage { channel, feeds } = page;
            if let Some(name) = channel.as_ref().and_then(|c| c.display_name()) {
                self.channel_name = Some(name);
            }

            let data = ReadingSet::from_feed(feeds);
            self.alerts = data
                .latest()
                .map(|latest| check_thresholds(latest, &self.thresholds))
                .unwrap_or_default();

            // Record history before updating
            self.history.record(&data);
            self.data = Some(data);
            self.load_error = None;

            // Clamp overlay scroll to the new table size
            if let Some(ref data) = self.data {
                self.data_scroll = self.data_scroll.min(data.len().saturating_sub(1));
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Switch to the next view (cycles Gas → Temperature → Humidity → Averages).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Open the cleaned-readings overlay.
    pub fn enter_data(&mut self) {
        self.data_scroll = 0;
        self.show_data_overlay = true;
    }

    /// Close the readings overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_data_overlay = false;
    }

    /// Navigate back: close any overlay, else return to the first view.
    pub fn go_back(&mut self) {
        if self.show_data_overlay {
            self.show_data_overlay = false;
            return;
        }
        if self.current_view != View::Gas {
            self.current_view = View::Gas;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Scroll the readings overlay down by n rows.
    pub fn scroll_down(&mut self, n: usize) {
        let max = self.data.as_ref().map_or(0, |d| d.len().saturating_sub(1));
        self.data_scroll = self.data_scroll.saturating_add(n).min(max);
    }

    /// Scroll the readings overlay up by n rows.
    pub fn scroll_up(&mut self, n: usize) {
        self.data_scroll = self.data_scroll.saturating_sub(n);
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        use std::io::Write;

        let Some(ref data) = self.data else {
            anyhow::bail!("No data to export");
        };

        let value = export_json(data, &self.alerts, self.channel_name.as_deref());
        let json = serde_json::to_string_pretty(&value)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}

/// Build the JSON export for a cleaned reading set.
pub fn export_json(
    data: &ReadingSet,
    alerts: &[Alert],
    channel_name: Option<&str>,
) -> serde_json::Value {
    let mut export = serde_json::Map::new();

    export.insert("channel".to_string(), serde_json::json!(channel_name));

    // Summary
    let mut summary = serde_json::Map::new();
    summary.insert("readings".to_string(), serde_json::json!(data.len()));
    summary.insert("dropped".to_string(), serde_json::json!(data.dropped));
    summary.insert(
        "averages".to_string(),
        data.averages().map_or(serde_json::Value::Null, |avg| {
            serde_json::json!({
                "gas": avg.gas,
                "temperature": avg.temperature,
                "humidity": avg.humidity,
            })
        }),
    );
    export.insert("summary".to_string(), serde_json::Value::Object(summary));

    // Latest reading
    export.insert(
        "latest".to_string(),
        data.latest().map_or(serde_json::Value::Null, |latest| {
            serde_json::json!({
                "created_at": latest.timestamp.to_rfc3339(),
                "temperature": latest.temperature,
                "humidity": latest.humidity,
                "gas": latest.gas,
            })
        }),
    );

    // Alerts
    let alerts: Vec<serde_json::Value> = alerts
        .iter()
        .map(|a| {
            serde_json::json!({
                "field": a.field.key(),
                "value": a.value,
                "message": a.message(),
            })
        })
        .collect();
    export.insert("alerts".to_string(), serde_json::Value::Array(alerts));

    // Cleaned readings
    let readings: Vec<serde_json::Value> = data
        .readings
        .iter()
        .map(|r| {
            serde_json::json!({
                "time": r.time_of_day,
                "temperature": r.temperature,
                "humidity": r.humidity,
                "gas": r.gas,
            })
        })
        .collect();
    export.insert("readings".to_string(), serde_json::Value::Array(readings));

    serde_json::Value::Object(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ChannelSource;

    #[derive(Debug)]
    struct FailingSource;

    impl DataSource for FailingSource {
        fn poll(&mut self) -> Option<FeedPage> {
            None
        }

        fn description(&self) -> &str {
            "test: failing"
        }

        fn error(&self) -> Option<String> {
            Some("Failed to fetch data: 404 Not Found".to_string())
        }
    }

    #[test]
    fn test_fetch_failure_is_surfaced_without_data() {
        let mut app = App::new(Box::new(FailingSource), Thresholds::default());

        let updated = app.reload_data().unwrap();

        assert!(!updated);
        assert!(app.data.is_none());
        assert!(app.alerts.is_empty());
        assert!(app.load_error.as_deref().unwrap().contains("404"));
    }

    #[test]
    fn test_reload_runs_clean_and_alert_pipeline() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), Thresholds::default());

        // Initial poll delivers the default empty page: no data rows,
        // no alerts, no crash.
        assert!(app.reload_data().unwrap());
        assert!(app.data.as_ref().unwrap().is_empty());
        assert!(app.alerts.is_empty());

        let page: FeedPage = serde_json::from_str(
            r#"{
                "channel": { "id": 2662816, "name": "Air Quality Station" },
                "feeds": [
                    { "created_at": "2024-10-10T08:15:30Z", "field1": "30.0", "field2": "50.0", "field3": "90.0" },
                    { "created_at": "2024-10-10T08:16:00Z", "field1": "oops", "field2": "50.0", "field3": "90.0" },
                    { "created_at": "2024-10-10T08:17:00Z", "field1": "30.0", "field2": "50.0", "field3": "150.0" }
                ]
            }"#,
        )
        .unwrap();
        tx.send(page).unwrap();

        assert!(app.reload_data().unwrap());

        let data = app.data.as_ref().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.dropped, 1);
        assert_eq!(app.channel_name.as_deref(), Some("Air Quality Station"));

        // Latest gas reading (150.0) breaches the default limit of 100.
        assert_eq!(app.alerts.len(), 1);
        assert_eq!(app.alerts[0].field, Field::Gas);
        assert!(app.load_error.is_none());
    }
}
