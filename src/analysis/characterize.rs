use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use super::periodicity::periodicity;
use super::stats;
use super::AnalysisError;
use crate::trace::Trace;

/// Power statistics over the non-zero readings of a trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerStats {
    /// Number of non-zero readings the statistics cover
    pub count: usize,
    /// Minimum power (W)
    pub min: f64,
    /// Maximum power (W)
    pub max: f64,
    /// Arithmetic mean power (W)
    pub avg: f64,
    /// Population standard deviation (W)
    pub std: f64,
}

/// Compute min, max, mean and population standard deviation of the
/// non-zero readings.
///
/// Zero readings are idle/no-data artifacts of the outlet, not genuine
/// zero-power samples, and are excluded.
pub fn power_stats(trace: &Trace) -> Result<PowerStats, AnalysisError> {
    let non_zero: Vec<f64> = trace.non_zero_readings().collect();

    let (min, max) = stats::min_max(&non_zero).ok_or(AnalysisError::EmptyTrace)?;
    let avg = stats::mean(&non_zero).ok_or(AnalysisError::EmptyTrace)?;
    let std = stats::population_std(&non_zero).ok_or(AnalysisError::EmptyTrace)?;

    Ok(PowerStats {
        count: non_zero.len(),
        min,
        max,
        avg,
        std,
    })
}

/// The named characterization metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Minimum non-zero power
    Min,
    /// Maximum power
    Max,
    /// Mean non-zero power
    Avg,
    /// Population standard deviation of non-zero power
    Std,
    /// Inverse standard deviation of the gap lengths
    GapStd,
}

impl Metric {
    /// All metrics in reporting order
    pub const ALL: [Metric; 5] = [
        Metric::Min,
        Metric::Max,
        Metric::Avg,
        Metric::Std,
        Metric::GapStd,
    ];

    /// Canonical metric name
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Min => "min",
            Metric::Max => "max",
            Metric::Avg => "avg",
            Metric::Std => "std",
            Metric::GapStd => "gap-std",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Min => "Min Power",
            Metric::Max => "Max Power",
            Metric::Avg => "Avg Power",
            Metric::Std => "Std Deviation",
            Metric::GapStd => "Periodicity",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AnalysisError::InvalidParameter(format!("unknown metric '{}'", s)))
    }
}

/// Summary statistics plus the periodicity estimate of a trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Characterization {
    /// Minimum non-zero power (W)
    pub min: f64,
    /// Maximum power (W)
    pub max: f64,
    /// Mean non-zero power (W)
    pub avg: f64,
    /// Population standard deviation of non-zero power (W)
    pub std: f64,
    /// Inverse population standard deviation of the gap lengths
    #[serde(rename = "gap-std")]
    pub gap_std: f64,
}

impl Characterization {
    /// Look up a metric by name
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Min => self.min,
            Metric::Max => self.max,
            Metric::Avg => self.avg,
            Metric::Std => self.std,
            Metric::GapStd => self.gap_std,
        }
    }

    /// Iterate over `(metric, value)` pairs in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

/// Characterize a trace: power statistics over the non-zero readings and the
/// periodicity of excursions above one standard deviation.
///
/// # Errors
///
/// - [`AnalysisError::EmptyTrace`] when no reading is non-zero.
/// - [`AnalysisError::DegeneratePeriodicity`] when the signal does not cross
///   its standard deviation often enough for the gap spread to be defined.
///
/// # Example
///
/// ```
/// use powertrace::analysis::characterize;
/// use powertrace::trace::Trace;
///
/// let trace = Trace::from_readings(vec![0.0, 9.0, 0.0, 0.0, 9.0, 0.0, 9.0, 1.0])?;
/// let ch = characterize(&trace)?;
/// assert_eq!(ch.min, 1.0);
/// assert_eq!(ch.max, 9.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn characterize(trace: &Trace) -> Result<Characterization, AnalysisError> {
    let power = power_stats(trace)?;
    let gap_std = periodicity(trace, power.std)?;

    debug!(
        "Characterized {} ({} of {} readings non-zero): avg={:.3} W, std={:.3} W, gap-std={:.4}",
        trace.name().unwrap_or("<unnamed>"),
        power.count,
        trace.len(),
        power.avg,
        power.std,
        gap_std
    );

    Ok(Characterization {
        min: power.min,
        max: power.max,
        avg: power.avg,
        std: power.std,
        gap_std,
    })
}
