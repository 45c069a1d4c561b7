//! Threshold evaluation for air quality readings.
//!
//! Each monitored field has a fixed alert limit; the most recent reading
//! is compared against the limits and one alert is emitted per breached
//! field, in a fixed field order.

use serde::{Deserialize, Serialize};

use super::readings::Reading;

/// One of the three monitored measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Gas,
    Temperature,
    Humidity,
}

impl Field {
    /// Alert evaluation order: gas, temperature, humidity.
    pub const ALL: [Field; 3] = [Field::Gas, Field::Temperature, Field::Humidity];

    /// Display label for metrics and alert messages.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Gas => "Gas Concentration",
            Field::Temperature => "Temperature",
            Field::Humidity => "Humidity",
        }
    }

    /// Measurement unit suffix.
    pub fn unit(&self) -> &'static str {
        match self {
            Field::Gas => "ppm",
            Field::Temperature => "°C",
            Field::Humidity => "%",
        }
    }

    /// Decimal places used when displaying values of this field.
    pub fn precision(&self) -> usize {
        match self {
            Field::Gas => 2,
            Field::Temperature | Field::Humidity => 1,
        }
    }

    /// Stable lowercase key for exports and configuration.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Gas => "gas",
            Field::Temperature => "temperature",
            Field::Humidity => "humidity",
        }
    }

    /// Format a value of this field with its unit, e.g. "150.00 ppm".
    pub fn format_value(&self, value: f64) -> String {
        format!("{:.*} {}", self.precision(), value, self.unit())
    }
}

/// Whether a reading is within its field's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Normal,
    Exceeded,
}

/// Per-field alert limits.
///
/// A strict greater-than comparison against these limits decides whether
/// a reading triggers an alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Gas concentration limit in ppm.
    pub gas: f64,
    /// Temperature limit in °C.
    pub temperature: f64,
    /// Relative humidity limit in %.
    pub humidity: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            gas: 100.0,
            temperature: 37.0,
            humidity: 80.0,
        }
    }
}

impl Thresholds {
    /// Returns the limit for the given field.
    pub fn limit(&self, field: Field) -> f64 {
        match field {
            Field::Gas => self.gas,
            Field::Temperature => self.temperature,
            Field::Humidity => self.humidity,
        }
    }

    /// Classify a value of the given field against its limit.
    pub fn status(&self, field: Field, value: f64) -> FieldStatus {
        if value > self.limit(field) {
            FieldStatus::Exceeded
        } else {
            FieldStatus::Normal
        }
    }
}

/// An alert raised because one field of a reading exceeded its limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub field: Field,
    /// The observed value that triggered the alert.
    pub value: f64,
}

impl Alert {
    /// Human-readable warning message, e.g.
    /// "Gas Concentration (150.00 ppm) exceeds threshold!".
    pub fn message(&self) -> String {
        format!(
            "{} ({}) exceeds threshold!",
            self.field.label(),
            self.field.format_value(self.value)
        )
    }
}

/// Evaluate one reading against the limits.
///
/// Emits alerts in the fixed order gas, temperature, humidity regardless
/// of breach magnitude. Comparison is strict greater-than; a value equal
/// to its limit does not alert.
pub fn check_thresholds(reading: &Reading, thresholds: &Thresholds) -> Vec<Alert> {
    Field::ALL
        .iter()
        .copied()
        .filter(|&field| reading.value(field) > thresholds.limit(field))
        .map(|field| Alert {
            field,
            value: reading.value(field),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn reading(temperature: f64, humidity: f64, gas: f64) -> Reading {
        Reading {
            timestamp: Utc::now(),
            time_of_day: "12:00:00".to_string(),
            temperature,
            humidity,
            gas,
        }
    }

    #[test]
    fn test_single_breach_emits_one_alert() {
        let alerts = check_thresholds(&reading(30.0, 50.0, 150.0), &Thresholds::default());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].field, Field::Gas);
        assert_eq!(
            alerts[0].message(),
            "Gas Concentration (150.00 ppm) exceeds threshold!"
        );
    }

    #[test]
    fn test_multiple_breaches_follow_fixed_order() {
        // Gas did not trigger, so the fixed order yields temperature first.
        let alerts = check_thresholds(&reading(40.55, 85.2, 10.0), &Thresholds::default());
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].field, Field::Temperature);
        assert_eq!(alerts[1].field, Field::Humidity);
        assert!(alerts[1].message().contains("85.2 %"));
    }

    #[test]
    fn test_comparison_is_strict() {
        // Values exactly at the limit do not alert.
        let alerts = check_thresholds(&reading(37.0, 80.0, 100.0), &Thresholds::default());
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_all_fields_breached() {
        let alerts = check_thresholds(&reading(45.0, 90.0, 200.0), &Thresholds::default());
        let fields: Vec<Field> = alerts.iter().map(|a| a.field).collect();
        assert_eq!(fields, vec![Field::Gas, Field::Temperature, Field::Humidity]);
    }

    #[test]
    fn test_value_formatting_per_field() {
        assert_eq!(Field::Gas.format_value(150.0), "150.00 ppm");
        assert_eq!(Field::Temperature.format_value(38.0), "38.0 °C");
        assert_eq!(Field::Humidity.format_value(85.0), "85.0 %");
    }

    #[test]
    fn test_custom_limits() {
        let thresholds = Thresholds {
            gas: 10.0,
            temperature: 50.0,
            humidity: 95.0,
        };
        let alerts = check_thresholds(&reading(30.0, 50.0, 20.0), &thresholds);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].field, Field::Gas);
        assert_eq!(thresholds.status(Field::Gas, 20.0), FieldStatus::Exceeded);
        assert_eq!(thresholds.status(Field::Humidity, 50.0), FieldStatus::Normal);
    }
}
