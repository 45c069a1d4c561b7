//! Wire types for the ThingSpeak feeds API.
//!
//! These types match the JSON returned by
//! `GET /channels/{id}/feeds.json`. They are the common raw format shared
//! by every data source; cleaning into typed readings happens downstream.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of feed entries plus channel metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedPage {
    /// Channel metadata block, absent in some stripped exports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelInfo>,

    /// Raw feed entries, oldest first.
    #[serde(default)]
    pub feeds: Vec<FeedEntry>,
}

/// Channel metadata as returned alongside the feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelInfo {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub name: Option<String>,

    /// Provider-side labels for the three monitored fields.
    #[serde(default)]
    pub field1: Option<String>,
    #[serde(default)]
    pub field2: Option<String>,
    #[serde(default)]
    pub field3: Option<String>,
}

impl ChannelInfo {
    /// Channel name, falling back to the numeric id.
    pub fn display_name(&self) -> Option<String> {
        self.name.clone().or_else(|| self.id.map(|id| id.to_string()))
    }
}

/// One raw telemetry sample as served by the provider.
///
/// Field values are loosely typed: the provider serializes them as
/// strings, but numbers and nulls occur. Coercion is the cleaner's job.
/// field1 = temperature, field2 = humidity, field3 = gas concentration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedEntry {
    #[serde(default)]
    pub created_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field1: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field2: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field3: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_feed_page() {
        let json = r#"{
            "channel": {
                "id": 2662816,
                "name": "Air Quality Station",
                "field1": "Temperature",
                "field2": "Humidity",
                "field3": "Gas"
            },
            "feeds": [
                {
                    "created_at": "2024-10-10T08:15:30Z",
                    "entry_id": 101,
                    "field1": "31.5",
                    "field2": "60",
                    "field3": "42.25"
                },
                {
                    "created_at": "2024-10-10T08:16:00Z",
                    "entry_id": 102,
                    "field1": 32.0,
                    "field2": null,
                    "field3": "43.00"
                }
            ]
        }"#;

        let page: FeedPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.feeds.len(), 2);

        let channel = page.channel.unwrap();
        assert_eq!(channel.display_name().unwrap(), "Air Quality Station");
        assert_eq!(channel.field1.as_deref(), Some("Temperature"));

        let first = &page.feeds[0];
        assert_eq!(first.created_at, "2024-10-10T08:15:30Z");
        assert_eq!(first.entry_id, Some(101));
        assert_eq!(first.field1, Some(Value::String("31.5".to_string())));

        // Numbers and nulls survive deserialization untouched.
        let second = &page.feeds[1];
        assert!(second.field1.as_ref().unwrap().is_number());
        assert_eq!(second.field2, Some(Value::Null));
    }

    #[test]
    fn test_missing_feeds_defaults_to_empty() {
        let page: FeedPage = serde_json::from_str("{}").unwrap();
        assert!(page.feeds.is_empty());
        assert!(page.channel.is_none());
    }

    #[test]
    fn test_channel_display_name_falls_back_to_id() {
        let channel: ChannelInfo = serde_json::from_str(r#"{"id": 2662816}"#).unwrap();
        assert_eq!(channel.display_name().unwrap(), "2662816");
    }
}
