use serde::{Deserialize, Serialize};

use super::TraceError;

/// A single timestamped power reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds since the Unix epoch
    pub timestamp: f64,
    /// Power in watts
    pub watts: f64,
}

/// Aligned timestamp/power-reading sequences for one device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    name: Option<String>,
    timestamps: Vec<f64>,
    readings: Vec<f64>,
}

impl Trace {
    /// Create a trace from aligned timestamp and reading sequences.
    ///
    /// Fails when the sequences differ in length or a reading is not a finite,
    /// non-negative number of watts. Timestamp ordering is taken as given.
    pub fn new(timestamps: Vec<f64>, readings: Vec<f64>) -> Result<Self, TraceError> {
        if timestamps.len() != readings.len() {
            return Err(TraceError::LengthMismatch {
                timestamps: timestamps.len(),
                readings: readings.len(),
            });
        }

        if let Some((index, &value)) = readings.iter().enumerate().find(|(_, w)| !w.is_finite()) {
            return Err(TraceError::NonFiniteReading { index, value });
        }

        if let Some((index, &value)) = readings.iter().enumerate().find(|(_, w)| **w < 0.0) {
            return Err(TraceError::NegativeReading { index, value });
        }

        Ok(Self {
            name: None,
            timestamps,
            readings,
        })
    }

    /// Create a trace from readings alone, using the sample index as timestamp
    pub fn from_readings(readings: Vec<f64>) -> Result<Self, TraceError> {
        let timestamps = (0..readings.len()).map(|i| i as f64).collect();
        Self::new(timestamps, readings)
    }

    /// Attach a human-readable name (e.g., "Printer")
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name of the trace, if one was given
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Timestamps in seconds since the Unix epoch
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Power readings in watts
    pub fn readings(&self) -> &[f64] {
        &self.readings
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether the trace holds no samples
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Iterate over the samples in load order
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.timestamps
            .iter()
            .zip(&self.readings)
            .map(|(&timestamp, &watts)| Sample { timestamp, watts })
    }

    /// Readings with idle (exactly zero) samples removed
    pub fn non_zero_readings(&self) -> impl Iterator<Item = f64> + '_ {
        self.readings.iter().copied().filter(|&w| w != 0.0)
    }

    /// Number of non-zero readings
    pub fn non_zero_count(&self) -> usize {
        self.non_zero_readings().count()
    }

    /// Time span covered by the trace in seconds
    pub fn duration_secs(&self) -> Option<f64> {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(first), Some(last)) => Some(last - first),
            _ => None,
        }
    }
}
