//! Layered settings for the dashboard.
//!
//! Settings come from, in increasing precedence: built-in defaults, an
//! optional config file, `AQWATCH_*` environment variables, and CLI flags
//! (applied by the binary after loading).

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::data::Thresholds;
use crate::fetch;

/// Dashboard configuration.
///
/// ```toml
/// channel_id = "2662816"
/// api_key = "XXXXXXXXXXXXXXXX"
/// results = 1000
/// refresh = 15
///
/// [thresholds]
/// gas = 100.0
/// temperature = 37.0
/// humidity = 80.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// ThingSpeak channel to poll.
    pub channel_id: String,

    /// Read API key; not needed for public channels.
    pub api_key: Option<String>,

    /// Number of records per fetch (the analysis window).
    pub results: u32,

    /// Seconds between fetches.
    pub refresh: u64,

    /// Per-field alert limits.
    pub thresholds: Thresholds,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            channel_id: String::new(),
            api_key: None,
            results: fetch::DEFAULT_RESULTS,
            refresh: 15,
            thresholds: Thresholds::default(),
        }
    }
}

impl Settings {
    /// Load settings from an optional config file and the environment.
    ///
    /// Environment variables use the `AQWATCH_` prefix with `__` as the
    /// nesting separator, e.g. `AQWATCH_CHANNEL_ID=2662816` or
    /// `AQWATCH_THRESHOLDS__GAS=120`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("AQWATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.channel_id.is_empty());
        assert!(settings.api_key.is_none());
        assert_eq!(settings.results, 1000);
        assert_eq!(settings.refresh, 15);
        assert_eq!(settings.thresholds.gas, 100.0);
        assert_eq!(settings.thresholds.temperature, 37.0);
        assert_eq!(settings.thresholds.humidity, 80.0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
channel_id = "2662816"
api_key = "TESTKEY"
refresh = 30

[thresholds]
gas = 120.0
"#
        )
        .unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.channel_id, "2662816");
        assert_eq!(settings.api_key.as_deref(), Some("TESTKEY"));
        assert_eq!(settings.refresh, 30);
        // Unset keys fall back to defaults
        assert_eq!(settings.results, 1000);
        assert_eq!(settings.thresholds.gas, 120.0);
        assert_eq!(settings.thresholds.humidity, 80.0);
    }
}
