use serde::{Deserialize, Serialize};

use super::LoaderError;

/// Layout of a power log file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Column delimiter (single ASCII character)
    pub delimiter: char,

    /// `chrono` format of the timestamp column
    pub timestamp_format: String,

    /// Divisor turning raw power values into watts (1000 for milliwatts)
    pub power_scale: f64,

    /// Rows whose first column equals this marker are skipped
    pub skip_marker: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            power_scale: 1000.0,
            skip_marker: "time".to_string(),
        }
    }
}

impl LoaderConfig {
    /// Delimiter as a byte, checking it is ASCII
    pub(super) fn delimiter_byte(&self) -> Result<u8, LoaderError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                LoaderError::InvalidConfig(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    self.delimiter
                ))
            })
    }

    pub(super) fn validate(&self) -> Result<(), LoaderError> {
        self.delimiter_byte()?;
        if !self.power_scale.is_finite() || self.power_scale <= 0.0 {
            return Err(LoaderError::InvalidConfig(format!(
                "power_scale must be a finite positive number, got {}",
                self.power_scale
            )));
        }
        Ok(())
    }
}
