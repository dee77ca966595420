//! # Raw Export Cleaner
//!
//! Turns a raw smart-outlet export (as produced by the time-series database,
//! one row per reading with `_time`, `device_id` and `analogInput_3` columns)
//! into a tidy table:
//!
//! | Column | Unit | Description |
//! |--------|------|-------------|
//! | Time   | UTC  | Reading time, sorted ascending |
//! | Power  | W    | Raw milliwatts / 1000 |
//! | Energy | Wh   | `Δt × Power / 3600`, Δt to the previous row, 0 for the first |
//!
//! Columns are located by header name, so annotation columns and `#`
//! annotation rows of the export are ignored. Rows whose timestamp cannot be
//! parsed are dropped and counted.

mod config;
mod error;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::trace::Trace;

pub use config::CleanerConfig;
pub use error::CleanerError;

/// Timestamp layout written to the tidy table
pub const TIDY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the tidy table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    /// Reading time (UTC)
    pub time: NaiveDateTime,
    /// Device the reading came from, when the export has a device column
    pub device_id: Option<String>,
    /// Power in watts
    pub power_w: f64,
    /// Energy since the previous row in watt-hours
    pub energy_wh: Option<f64>,
}

impl CleanedRecord {
    /// Reading time as seconds since the Unix epoch
    pub fn epoch_secs(&self) -> f64 {
        let utc = self.time.and_utc();
        utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) / 1e9
    }
}

/// Result of cleaning a raw export
#[derive(Debug, Clone, Default)]
pub struct CleanedTable {
    records: Vec<CleanedRecord>,
    dropped_rows: usize,
    has_energy: bool,
}

impl CleanedTable {
    /// Rows sorted by time
    pub fn records(&self) -> &[CleanedRecord] {
        &self.records
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no row survived cleaning
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows dropped for an unparseable timestamp
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Total energy in watt-hours, `None` when energy was not computed
    pub fn total_energy_wh(&self) -> Option<f64> {
        self.has_energy
            .then(|| self.records.iter().filter_map(|r| r.energy_wh).sum())
    }

    /// Convert to a named trace of epoch seconds and watts
    pub fn to_trace(&self, name: impl Into<String>) -> Result<Trace, CleanerError> {
        let timestamps = self.records.iter().map(CleanedRecord::epoch_secs).collect();
        let readings = self.records.iter().map(|r| r.power_w).collect();
        Ok(Trace::new(timestamps, readings)?.with_name(name))
    }

    /// Write the tidy table as CSV (`Time,Power[,Energy]`)
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), CleanerError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if self.has_energy {
            csv_writer.write_record(["Time", "Power", "Energy"])?;
        } else {
            csv_writer.write_record(["Time", "Power"])?;
        }

        for record in &self.records {
            let time = record.time.format(TIDY_TIME_FORMAT).to_string();
            let power = record.power_w.to_string();
            if self.has_energy {
                let energy = record.energy_wh.unwrap_or(0.0).to_string();
                csv_writer.write_record([time.as_str(), power.as_str(), energy.as_str()])?;
            } else {
                csv_writer.write_record([time.as_str(), power.as_str()])?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write the tidy table to a CSV file
    pub fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<(), CleanerError> {
        let file = File::create(path.as_ref())?;
        self.write_csv(BufWriter::new(file))?;
        info!("Wrote {} rows to {}", self.len(), path.as_ref().display());
        Ok(())
    }
}

/// Cleans raw exports according to a [`CleanerConfig`]
#[derive(Debug, Clone, Default)]
pub struct DataCleaner {
    config: CleanerConfig,
}

struct ColumnIndices {
    time: usize,
    power: usize,
    device: Option<usize>,
}

impl DataCleaner {
    /// Create a cleaner with the given options
    pub fn new(config: CleanerConfig) -> Self {
        Self { config }
    }

    /// Options this cleaner applies
    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Clean a raw export file
    pub fn clean_path<P: AsRef<Path>>(&self, path: P) -> Result<CleanedTable, CleanerError> {
        let file = File::open(path.as_ref())?;
        info!("Cleaning {}", path.as_ref().display());
        self.clean(BufReader::new(file))
    }

    /// Clean a raw export from any reader
    pub fn clean<R: Read>(&self, reader: R) -> Result<CleanedTable, CleanerError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        let columns = self.locate_columns(&headers)?;

        let mut records = Vec::new();
        let mut dropped_rows = 0usize;

        for row in csv_reader.records() {
            let row = row?;

            let device_id = columns
                .device
                .and_then(|i| row.get(i))
                .map(|d| d.trim().to_string());
            if let Some(wanted) = &self.config.device_id {
                if device_id.as_deref() != Some(wanted.as_str()) {
                    continue;
                }
            }

            let raw_time = row.get(columns.time).unwrap_or("").trim();
            let Some(time) = parse_time(raw_time) else {
                debug!(
                    "Dropping row {}: unparseable time '{}'",
                    row.position().map_or(0, |p| p.line()),
                    raw_time
                );
                dropped_rows += 1;
                continue;
            };

            let power_w = row
                .get(columns.power)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .map_or(0.0, |v| v / self.config.power_scale);

            records.push(CleanedRecord {
                time,
                device_id,
                power_w,
                energy_wh: None,
            });
        }

        if dropped_rows > 0 {
            warn!("Dropped {} rows with unparseable timestamps", dropped_rows);
        }

        records.sort_by_key(|r| r.time);

        if self.config.calc_energy {
            fill_energy(&mut records);
        }

        Ok(CleanedTable {
            records,
            dropped_rows,
            has_energy: self.config.calc_energy,
        })
    }

    fn locate_columns(&self, headers: &[String]) -> Result<ColumnIndices, CleanerError> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let time = find(&self.config.time_column)
            .ok_or_else(|| CleanerError::MissingColumn(self.config.time_column.clone()))?;
        let power = find(&self.config.power_column)
            .ok_or_else(|| CleanerError::MissingColumn(self.config.power_column.clone()))?;
        let device = find(&self.config.device_column);

        if self.config.device_id.is_some() && device.is_none() {
            return Err(CleanerError::MissingColumn(self.config.device_column.clone()));
        }

        Ok(ColumnIndices {
            time,
            power,
            device,
        })
    }
}

/// Parse an export timestamp: RFC 3339 first, then naive date-time layouts
fn parse_time(value: &str) -> Option<NaiveDateTime> {
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn fill_energy(records: &mut [CleanedRecord]) {
    let mut previous: Option<NaiveDateTime> = None;
    for record in records.iter_mut() {
        let energy = match previous {
            Some(prev) => {
                let delta = record.time - prev;
                let dt_secs = delta.num_nanoseconds().map_or_else(
                    || delta.num_milliseconds() as f64 / 1e3,
                    |nanos| nanos as f64 / 1e9,
                );
                dt_secs * record.power_w / 3600.0
            }
            None => 0.0,
        };
        record.energy_wh = Some(energy);
        previous = Some(record.time);
    }
}

/// Clean a raw export file with the default column names
pub fn clean_export<P: AsRef<Path>>(path: P) -> Result<CleanedTable, CleanerError> {
    DataCleaner::default().clean_path(path)
}
