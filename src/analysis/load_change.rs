//! Naive change-of-load detection.
//!
//! A smart outlet may have its appliance swapped (e.g., coffee maker to
//! printer). This detector keeps a running mean of the non-zero readings and
//! flags every reading that deviates from it by at least a relative
//! threshold. It cannot tell a new appliance from a new operating phase of
//! the same one; it is a starting point for better detectors.

use serde::{Deserialize, Serialize};

use super::AnalysisError;
use crate::trace::Trace;

/// Detector settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadChangeConfig {
    /// Minimum deviation from the running mean, in percent
    pub threshold_pct: f64,
}

impl Default for LoadChangeConfig {
    fn default() -> Self {
        Self {
            threshold_pct: 50.0,
        }
    }
}

/// A reading flagged as a potential change of load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadChange {
    /// Index of the reading in the trace
    pub index: usize,
    /// Timestamp of the reading (seconds since epoch)
    pub timestamp: f64,
    /// Power of the reading (W)
    pub watts: f64,
    /// Running mean including this reading (W)
    pub running_mean: f64,
    /// Relative deviation from the running mean, in percent
    pub deviation_pct: f64,
}

/// Flag readings deviating from the running mean of non-zero readings by at
/// least `threshold_pct` percent. Zero readings are skipped.
pub fn detect_load_changes(
    trace: &Trace,
    config: &LoadChangeConfig,
) -> Result<Vec<LoadChange>, AnalysisError> {
    if !config.threshold_pct.is_finite() || config.threshold_pct < 0.0 {
        return Err(AnalysisError::InvalidParameter(format!(
            "threshold_pct must be a finite non-negative number, got {}",
            config.threshold_pct
        )));
    }

    let mut sum = 0.0;
    let mut count = 0usize;
    let mut changes = Vec::new();

    for (index, sample) in trace.samples().enumerate() {
        if sample.watts == 0.0 {
            continue;
        }

        sum += sample.watts;
        count += 1;
        let running_mean = sum / count as f64;

        let deviation_pct = ((sample.watts - running_mean) / running_mean).abs() * 100.0;
        if deviation_pct >= config.threshold_pct {
            changes.push(LoadChange {
                index,
                timestamp: sample.timestamp,
                watts: sample.watts,
                running_mean,
                deviation_pct,
            });
        }
    }

    Ok(changes)
}
