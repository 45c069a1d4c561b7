//! Cleaning and summarizing of raw feed entries.
//!
//! This module turns the loosely-typed entries returned by the feeds API
//! into a typed, ordered table of readings. Cleaning is all-or-nothing per
//! row: a row missing a parseable timestamp or any of the three numeric
//! fields is dropped, never repaired.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::alert::Field;
use super::clock;
use crate::source::FeedEntry;

/// One cleaned telemetry sample.
///
/// All three numeric fields are present and finite; rows that cannot
/// guarantee this never become a `Reading`.
#[derive(Debug, Clone)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    /// Time-only display string derived from the timestamp ("HH:MM:SS").
    pub time_of_day: String,
    pub temperature: f64,
    pub humidity: f64,
    pub gas: f64,
}

impl Reading {
    /// Returns the value of the given field.
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Gas => self.gas,
            Field::Temperature => self.temperature,
            Field::Humidity => self.humidity,
        }
    }
}

/// Arithmetic means of each field over a reading set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Averages {
    pub gas: f64,
    pub temperature: f64,
    pub humidity: f64,
}

impl Averages {
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Gas => self.gas,
            Field::Temperature => self.temperature,
            Field::Humidity => self.humidity,
        }
    }
}

/// An ordered table of cleaned readings from one fetch cycle.
///
/// Order follows the fetch order of the raw feed (chronological ascending
/// as served by the provider). Rebuilt from scratch on every cycle.
#[derive(Debug, Clone)]
pub struct ReadingSet {
    pub readings: Vec<Reading>,
    /// Rows discarded during cleaning.
    pub dropped: usize,
    pub last_updated: Instant,
}

impl ReadingSet {
    /// Clean a sequence of raw feed entries into a reading set.
    pub fn from_feed(entries: Vec<FeedEntry>) -> Self {
        let total = entries.len();
        let readings: Vec<Reading> = entries.into_iter().filter_map(clean_entry).collect();
        let dropped = total - readings.len();

        Self {
            readings,
            dropped,
            last_updated: Instant::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// The most recent reading, if any.
    ///
    /// The empty case is a real state (fresh channel, or every row dropped
    /// in cleaning) and callers must branch on it.
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.last()
    }

    /// Per-field means, or `None` for an empty set.
    pub fn averages(&self) -> Option<Averages> {
        if self.readings.is_empty() {
            return None;
        }

        let n = self.readings.len() as f64;
        let (gas, temperature, humidity) =
            self.readings.iter().fold((0.0, 0.0, 0.0), |(g, t, h), r| {
                (g + r.gas, t + r.temperature, h + r.humidity)
            });

        Some(Averages {
            gas: gas / n,
            temperature: temperature / n,
            humidity: humidity / n,
        })
    }

    /// Chart points for one field, x being the reading's position in the set.
    pub fn series(&self, field: Field) -> Vec<(f64, f64)> {
        self.readings
            .iter()
            .enumerate()
            .map(|(i, r)| (i as f64, r.value(field)))
            .collect()
    }

    /// Observed (min, max) for one field, or `None` for an empty set.
    pub fn value_bounds(&self, field: Field) -> Option<(f64, f64)> {
        self.readings.iter().map(|r| r.value(field)).fold(None, |acc, v| {
            Some(match acc {
                None => (v, v),
                Some((min, max)) => (min.min(v), max.max(v)),
            })
        })
    }
}

fn clean_entry(entry: FeedEntry) -> Option<Reading> {
    let timestamp = clock::parse_timestamp(&entry.created_at)?;
    let temperature = coerce_numeric(entry.field1.as_ref())?;
    let humidity = coerce_numeric(entry.field2.as_ref())?;
    let gas = coerce_numeric(entry.field3.as_ref())?;

    Some(Reading {
        time_of_day: clock::time_of_day(&timestamp),
        timestamp,
        temperature,
        humidity,
        gas,
    })
}

/// Coerce a raw field value to a finite number.
///
/// The provider serializes field values as strings, but numbers and nulls
/// occur in the wild; anything that does not yield a finite f64 is absent.
fn coerce_numeric(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    parsed.is_finite().then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(created_at: &str, temperature: Value, humidity: Value, gas: Value) -> FeedEntry {
        FeedEntry {
            created_at: created_at.to_string(),
            entry_id: None,
            field1: Some(temperature),
            field2: Some(humidity),
            field3: Some(gas),
        }
    }

    fn valid_entry(created_at: &str, temperature: f64, humidity: f64, gas: f64) -> FeedEntry {
        entry(
            created_at,
            json!(temperature.to_string()),
            json!(humidity.to_string()),
            json!(gas.to_string()),
        )
    }

    #[test]
    fn test_clean_parses_string_fields() {
        let set = ReadingSet::from_feed(vec![valid_entry("2024-10-10T08:15:30Z", 31.5, 60.0, 42.25)]);

        assert_eq!(set.len(), 1);
        assert_eq!(set.dropped, 0);
        let reading = set.latest().unwrap();
        assert_eq!(reading.temperature, 31.5);
        assert_eq!(reading.humidity, 60.0);
        assert_eq!(reading.gas, 42.25);
        assert_eq!(reading.time_of_day, "08:15:30");
    }

    #[test]
    fn test_clean_accepts_numeric_fields() {
        let set = ReadingSet::from_feed(vec![entry(
            "2024-10-10T08:15:30Z",
            json!(31.5),
            json!(60),
            json!(42.25),
        )]);

        assert_eq!(set.len(), 1);
        assert_eq!(set.latest().unwrap().humidity, 60.0);
    }

    #[test]
    fn test_non_numeric_field_drops_whole_row() {
        let set = ReadingSet::from_feed(vec![
            valid_entry("2024-10-10T08:00:00Z", 30.0, 55.0, 40.0),
            entry(
                "2024-10-10T08:01:00Z",
                json!("not a number"),
                json!("55.0"),
                json!("40.0"),
            ),
            valid_entry("2024-10-10T08:02:00Z", 32.0, 57.0, 44.0),
        ]);

        // No partial rows: the bad row is gone entirely.
        assert_eq!(set.len(), 2);
        assert_eq!(set.dropped, 1);
        assert_eq!(set.readings[0].temperature, 30.0);
        assert_eq!(set.readings[1].temperature, 32.0);
    }

    #[test]
    fn test_missing_field_drops_row() {
        let mut bad = valid_entry("2024-10-10T08:00:00Z", 30.0, 55.0, 40.0);
        bad.field3 = None;

        let set = ReadingSet::from_feed(vec![bad]);
        assert!(set.is_empty());
        assert_eq!(set.dropped, 1);
    }

    #[test]
    fn test_null_field_drops_row() {
        let set = ReadingSet::from_feed(vec![entry(
            "2024-10-10T08:00:00Z",
            json!("30.0"),
            Value::Null,
            json!("40.0"),
        )]);

        assert!(set.is_empty());
        assert_eq!(set.dropped, 1);
    }

    #[test]
    fn test_bad_timestamp_drops_row() {
        let set = ReadingSet::from_feed(vec![valid_entry("yesterday-ish", 30.0, 55.0, 40.0)]);
        assert!(set.is_empty());
        assert_eq!(set.dropped, 1);
    }

    #[test]
    fn test_order_is_preserved() {
        let set = ReadingSet::from_feed(vec![
            valid_entry("2024-10-10T08:00:00Z", 1.0, 1.0, 1.0),
            valid_entry("2024-10-10T08:01:00Z", 2.0, 2.0, 2.0),
            valid_entry("2024-10-10T08:02:00Z", 3.0, 3.0, 3.0),
        ]);

        let temps: Vec<f64> = set.readings.iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![1.0, 2.0, 3.0]);
        assert_eq!(set.latest().unwrap().temperature, 3.0);
    }

    #[test]
    fn test_empty_feed_yields_empty_set() {
        let set = ReadingSet::from_feed(Vec::new());
        assert!(set.is_empty());
        assert_eq!(set.dropped, 0);
        assert!(set.latest().is_none());
        assert!(set.averages().is_none());
        assert!(set.value_bounds(Field::Gas).is_none());
        assert!(set.series(Field::Gas).is_empty());
    }

    #[test]
    fn test_averages_lie_within_observed_bounds() {
        let set = ReadingSet::from_feed(vec![
            valid_entry("2024-10-10T08:00:00Z", 20.0, 40.0, 10.0),
            valid_entry("2024-10-10T08:01:00Z", 30.0, 60.0, 30.0),
            valid_entry("2024-10-10T08:02:00Z", 25.0, 50.0, 110.0),
        ]);

        let averages = set.averages().unwrap();
        for field in Field::ALL {
            let (min, max) = set.value_bounds(field).unwrap();
            let mean = averages.value(field);
            assert!(mean >= min - 1e-9 && mean <= max + 1e-9);
        }
        assert!((averages.temperature - 25.0).abs() < 1e-9);
        assert!((averages.gas - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_series_is_indexed_in_order() {
        let set = ReadingSet::from_feed(vec![
            valid_entry("2024-10-10T08:00:00Z", 1.0, 1.0, 5.0),
            valid_entry("2024-10-10T08:01:00Z", 2.0, 2.0, 7.0),
        ]);

        assert_eq!(set.series(Field::Gas), vec![(0.0, 5.0), (1.0, 7.0)]);
    }
}
