//! # Power Log Loader
//!
//! Reads delimited power logs exported from a smart outlet into a
//! [`Trace`]. The expected layout is:
//!
//! ```text
//! time,value
//! 2024-07-31 00:00:01,131061
//! 2024-07-31 00:00:02,162186
//! ```
//!
//! - Any row whose first column is literally `time` is skipped, so header rows
//!   (and headers repeated by concatenated exports) are ignored.
//! - Timestamps follow a fixed pattern (default `%Y-%m-%d %H:%M:%S`) and are
//!   interpreted as UTC.
//! - Power values are milliwatts and are divided by 1000 at load time.
//!
//! A UTF-8 byte-order mark at the start of the file is tolerated.

mod config;
mod error;


use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDateTime;
use log::{debug, info};

use crate::trace::Trace;

pub use config::LoaderConfig;
pub use error::LoaderError;

/// Loads power logs according to a [`LoaderConfig`]
#[derive(Debug, Clone, Default)]
pub struct TraceLoader {
    config: LoaderConfig,
}

impl TraceLoader {
    /// Create a loader for the given file layout
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// File layout this loader expects
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a log file; the trace is named after the file stem
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Trace, LoaderError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let trace = self.load_reader(BufReader::new(file))?;

        info!("Loaded {} samples from {}", trace.len(), path.display());

        Ok(match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => trace.with_name(stem),
            None => trace,
        })
    }

    /// Load a log from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Trace, LoaderError> {
        self.config.validate()?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter_byte()?)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut timestamps = Vec::new();
        let mut readings = Vec::new();
        let mut skipped = 0usize;

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());

            let time_field = match record.get(0) {
                Some(field) => field.trim_start_matches('\u{feff}').trim(),
                None => continue,
            };
            if time_field == self.config.skip_marker {
                skipped += 1;
                continue;
            }

            let power_field = record
                .get(1)
                .map(str::trim)
                .ok_or(LoaderError::MissingField { line })?;

            timestamps.push(self.parse_timestamp(time_field, line)?);
            readings.push(self.parse_power(power_field, line)?);
        }

        debug!(
            "Parsed {} rows, skipped {} marker rows",
            readings.len(),
            skipped
        );

        Ok(Trace::new(timestamps, readings)?)
    }

    fn parse_timestamp(&self, value: &str, line: u64) -> Result<f64, LoaderError> {
        let parsed = NaiveDateTime::parse_from_str(value, &self.config.timestamp_format)
            .map_err(|_| LoaderError::InvalidTimestamp {
                line,
                value: value.to_string(),
            })?;

        let utc = parsed.and_utc();
        Ok(utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) / 1e9)
    }

    fn parse_power(&self, value: &str, line: u64) -> Result<f64, LoaderError> {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v / self.config.power_scale)
            .ok_or_else(|| LoaderError::InvalidPower {
                line,
                value: value.to_string(),
            })
    }
}

/// Load a log file with the default layout
pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Trace, LoaderError> {
    TraceLoader::default().load_path(path)
}
