use std::fmt;

use serde::{Deserialize, Serialize};

use super::stats;
use super::AnalysisError;
use crate::trace::Trace;

/// Descriptive table of the non-zero readings of a trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of non-zero readings
    pub count: usize,
    /// Mean power (W)
    pub mean: f64,
    /// Sample standard deviation (W), NaN for a single reading
    pub std: f64,
    /// Minimum power (W)
    pub min: f64,
    /// First quartile (W)
    pub q25: f64,
    /// Median (W)
    pub median: f64,
    /// Third quartile (W)
    pub q75: f64,
    /// Maximum power (W)
    pub max: f64,
}

/// Describe the non-zero readings: count, mean, sample std, min, quartiles, max
pub fn summarize(trace: &Trace) -> Result<Summary, AnalysisError> {
    let mut sorted: Vec<f64> = trace.non_zero_readings().collect();
    if sorted.is_empty() {
        return Err(AnalysisError::EmptyTrace);
    }
    sorted.sort_by(f64::total_cmp);

    let quantile = |q| stats::quantile(&sorted, q).ok_or(AnalysisError::EmptyTrace);

    Ok(Summary {
        count: sorted.len(),
        mean: stats::mean(&sorted).ok_or(AnalysisError::EmptyTrace)?,
        std: stats::sample_std(&sorted).ok_or(AnalysisError::EmptyTrace)?,
        min: sorted[0],
        q25: quantile(0.25)?,
        median: quantile(0.5)?,
        q75: quantile(0.75)?,
        max: sorted[sorted.len() - 1],
    })
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "count  {:>12}", self.count)?;
        writeln!(f, "mean   {:>12.6}", self.mean)?;
        writeln!(f, "std    {:>12.6}", self.std)?;
        writeln!(f, "min    {:>12.6}", self.min)?;
        writeln!(f, "25%    {:>12.6}", self.q25)?;
        writeln!(f, "50%    {:>12.6}", self.median)?;
        writeln!(f, "75%    {:>12.6}", self.q75)?;
        writeln!(f, "max    {:>12.6}", self.max)
    }
}
