//! Trend tracking for the metrics row sparklines.

use std::collections::VecDeque;

use super::alert::Field;
use super::readings::ReadingSet;

/// Maximum number of refresh cycles to keep per field.
const MAX_HISTORY_SIZE: usize = 60;

/// Tracks the latest reading of each field across refresh cycles.
///
/// Each recorded cycle contributes one point per field, enabling the
/// small trend sparklines next to the current-value metrics. This is
/// presentation state only; the reading table itself is rebuilt from
/// scratch every cycle.
#[derive(Debug, Clone, Default)]
pub struct History {
    gas: VecDeque<f64>,
    temperature: VecDeque<f64>,
    humidity: VecDeque<f64>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest reading of a cycle, if the cycle produced any.
    pub fn record(&mut self, data: &ReadingSet) {
        let Some(latest) = data.latest() else {
            return;
        };

        for field in Field::ALL {
            let series = self.series_mut(field);
            series.push_back(latest.value(field));
            if series.len() > MAX_HISTORY_SIZE {
                series.pop_front();
            }
        }
    }

    /// Get sparkline data for a field (normalized to 0-7 for 8 bar levels).
    ///
    /// Returns an empty Vec if there's not enough history.
    pub fn sparkline(&self, field: Field) -> Vec<u8> {
        let values = self.series(field);
        if values.len() < 2 {
            return Vec::new();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = (max - min).max(f64::EPSILON);

        values
            .iter()
            .map(|v| {
                let normalized = ((v - min) / range * 7.0) as u8;
                normalized.min(7)
            })
            .collect()
    }

    fn series(&self, field: Field) -> &VecDeque<f64> {
        match field {
            Field::Gas => &self.gas,
            Field::Temperature => &self.temperature,
            Field::Humidity => &self.humidity,
        }
    }

    fn series_mut(&mut self, field: Field) -> &mut VecDeque<f64> {
        match field {
            Field::Gas => &mut self.gas,
            Field::Temperature => &mut self.temperature,
            Field::Humidity => &mut self.humidity,
        }
    }
}
