//! TOML configuration file support.
//!
//! Instead of passing the same flags on every run, settings can live in a
//! config file:
//!
//! ```toml
//! # powertrace.toml
//! [loader]
//! delimiter = ","
//! timestamp_format = "%Y-%m-%d %H:%M:%S"
//! power_scale = 1000.0
//!
//! [distribution]
//! bin_count = 1000
//! max_value = 1000.0
//!
//! [load_change]
//! threshold_pct = 50.0
//!
//! [cleaner]
//! time_column = "_time"
//! power_column = "analogInput_3"
//! device_column = "device_id"
//! ```
//!
//! Command-line flags override file values, which override built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use powertrace::analysis::{AnalysisConfig, DistributionConfig, LoadChangeConfig};
use powertrace::cleaner::CleanerConfig;
use powertrace::loader::LoaderConfig;

/// Root configuration structure for powertrace.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Power log layout.
    #[serde(default)]
    pub loader: LoaderSection,

    /// Distribution resolution.
    #[serde(default)]
    pub distribution: DistributionSection,

    /// Change-of-load detector.
    #[serde(default)]
    pub load_change: LoadChangeSection,

    /// Raw export column names.
    #[serde(default)]
    pub cleaner: CleanerSection,
}

/// Configuration for loading power logs.
#[derive(Debug, Default, Deserialize)]
pub struct LoaderSection {
    /// Column delimiter.
    pub delimiter: Option<char>,

    /// Timestamp pattern (chrono syntax).
    pub timestamp_format: Option<String>,

    /// Divisor from raw values to watts.
    pub power_scale: Option<f64>,
}

/// Configuration for the power-level distribution.
#[derive(Debug, Default, Deserialize)]
pub struct DistributionSection {
    /// Number of bins.
    pub bin_count: Option<usize>,

    /// Upper end of the power axis in watts.
    pub max_value: Option<f64>,
}

/// Configuration for the change-of-load detector.
#[derive(Debug, Default, Deserialize)]
pub struct LoadChangeSection {
    /// Deviation threshold in percent.
    pub threshold_pct: Option<f64>,
}

/// Configuration for the export cleaner.
#[derive(Debug, Default, Deserialize)]
pub struct CleanerSection {
    /// Timestamp column name.
    pub time_column: Option<String>,

    /// Raw power column name.
    pub power_column: Option<String>,

    /// Device identifier column name.
    pub device_column: Option<String>,
}

/// Flag values that take precedence over the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalysisOverrides {
    pub bin_count: Option<usize>,
    pub max_value: Option<f64>,
    pub threshold_pct: Option<f64>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the given file, or fall back to defaults when none was passed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn loader_config(&self) -> LoaderConfig {
        let defaults = LoaderConfig::default();
        LoaderConfig {
            delimiter: self.loader.delimiter.unwrap_or(defaults.delimiter),
            timestamp_format: self
                .loader
                .timestamp_format
                .clone()
                .unwrap_or(defaults.timestamp_format),
            power_scale: self.loader.power_scale.unwrap_or(defaults.power_scale),
            skip_marker: defaults.skip_marker,
        }
    }

    pub fn analysis_config(&self, overrides: AnalysisOverrides) -> AnalysisConfig {
        let distribution = DistributionConfig::default();
        let load_change = LoadChangeConfig::default();

        AnalysisConfig {
            distribution: DistributionConfig {
                bin_count: overrides
                    .bin_count
                    .or(self.distribution.bin_count)
                    .unwrap_or(distribution.bin_count),
                max_value: overrides
                    .max_value
                    .or(self.distribution.max_value)
                    .unwrap_or(distribution.max_value),
            },
            load_change: LoadChangeConfig {
                threshold_pct: overrides
                    .threshold_pct
                    .or(self.load_change.threshold_pct)
                    .unwrap_or(load_change.threshold_pct),
            },
        }
    }

    pub fn cleaner_config(&self, device_id: Option<String>, calc_energy: bool) -> CleanerConfig {
        let defaults = CleanerConfig::default();
        CleanerConfig {
            time_column: self.cleaner.time_column.clone().unwrap_or(defaults.time_column),
            power_column: self.cleaner.power_column.clone().unwrap_or(defaults.power_column),
            device_column: self
                .cleaner
                .device_column
                .clone()
                .unwrap_or(defaults.device_column),
            device_id,
            calc_energy,
            power_scale: defaults.power_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [loader]
            delimiter = ";"
            power_scale = 1.0

            [distribution]
            bin_count = 200
            max_value = 50.0

            [load_change]
            threshold_pct = 25.0
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.loader.delimiter, Some(';'));
        assert_eq!(config.distribution.bin_count, Some(200));

        let loader = config.loader_config();
        assert_eq!(loader.delimiter, ';');
        assert_eq!(loader.power_scale, 1.0);
        assert_eq!(loader.timestamp_format, "%Y-%m-%d %H:%M:%S");

        let analysis = config.analysis_config(AnalysisOverrides::default());
        assert_eq!(analysis.distribution.bin_count, 200);
        assert_eq!(analysis.distribution.max_value, 50.0);
        assert_eq!(analysis.load_change.threshold_pct, 25.0);
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config::from_str("[distribution]\nbin_count = 200\n").unwrap();
        let analysis = config.analysis_config(AnalysisOverrides {
            bin_count: Some(10),
            ..Default::default()
        });
        assert_eq!(analysis.distribution.bin_count, 10);
        assert_eq!(analysis.distribution.max_value, 1000.0);
    }

    #[test]
    fn test_cleaner_section() {
        let config = Config::from_str("[cleaner]\npower_column = \"power\"\n").unwrap();
        let cleaner = config.cleaner_config(Some("563672".to_string()), false);
        assert_eq!(cleaner.power_column, "power");
        assert_eq!(cleaner.time_column, "_time");
        assert_eq!(cleaner.device_id.as_deref(), Some("563672"));
        assert!(!cleaner.calc_energy);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.distribution.bin_count, None);
        assert_eq!(config.loader_config(), LoaderConfig::default());
    }
}
