use std::io::Write;

use log::debug;
use serde::{Deserialize, Serialize};

use super::AnalysisError;
use crate::trace::Trace;

/// Resolution of the power-level histogram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Number of bins
    pub bin_count: usize,
    /// Upper end of the power domain (W); readings above it land in the last bin
    pub max_value: f64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            bin_count: 1000,
            max_value: 1000.0,
        }
    }
}

impl DistributionConfig {
    /// Create a configuration with the given resolution
    pub fn new(bin_count: usize, max_value: f64) -> Self {
        Self {
            bin_count,
            max_value,
        }
    }

    /// Check that both parameters are positive
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.bin_count == 0 {
            return Err(AnalysisError::InvalidParameter(
                "bin_count must be positive".to_string(),
            ));
        }
        if !self.max_value.is_finite() || self.max_value <= 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "max_value must be a finite positive number, got {}",
                self.max_value
            )));
        }
        Ok(())
    }

    /// Width of one bin in watts
    pub fn bin_width(&self) -> f64 {
        self.max_value / self.bin_count as f64
    }

    /// Bin a reading falls into.
    ///
    /// `round(w / max_value * bin_count)` with ties to even, clamped to the
    /// last bin. Negative readings saturate to bin 0.
    pub fn bin_index(&self, watts: f64) -> usize {
        let scaled = (watts / self.max_value * self.bin_count as f64).round_ties_even();
        // float -> usize casts saturate, so negatives map to 0
        (scaled as usize).min(self.bin_count - 1)
    }

    /// Power value plotted for each bin: `bin_count` evenly spaced points
    /// from 0 to `max_value` inclusive
    pub fn power_axis(&self) -> Vec<f64> {
        match self.bin_count {
            0 => Vec::new(),
            1 => vec![0.0],
            n => {
                let step = self.max_value / (n - 1) as f64;
                (0..n).map(|i| i as f64 * step).collect()
            }
        }
    }
}

/// Fraction of all samples spent at each power level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    config: DistributionConfig,
    bins: Vec<f64>,
}

impl Distribution {
    /// Configuration the distribution was estimated with
    pub fn config(&self) -> &DistributionConfig {
        &self.config
    }

    /// Per-bin probability mass, indexed `0..bin_count`
    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    /// Consume the distribution, returning the bins
    pub fn into_bins(self) -> Vec<f64> {
        self.bins
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Whether there are no bins
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Sum over all bins; less than 1 when the trace contains zero readings
    pub fn total_mass(&self) -> f64 {
        self.bins.iter().sum()
    }

    /// `(power, density)` pairs for plotting or export
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.config
            .power_axis()
            .into_iter()
            .zip(self.bins.iter().copied())
    }

    /// Write `power_w,density` CSV rows, one per bin
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["power_w", "density"])?;
        for (power, density) in self.points() {
            csv_writer.write_record([power.to_string(), density.to_string()])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Index and mass of the most populated bin, `None` when no mass
    pub fn mode(&self) -> Option<(usize, f64)> {
        self.bins
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, p)| p > 0.0)
            .fold(None, |best, (i, p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((i, p)),
            })
    }
}

/// Histogram of time spent at each power level, normalized by the total
/// number of samples.
///
/// Zero readings are not accumulated but still count in the denominator, so
/// the result is "fraction of all samples in this bin" and sums to
/// `non_zero / total`. An empty trace yields all-zero bins.
///
/// # Errors
///
/// [`AnalysisError::InvalidParameter`] when `bin_count` is zero or
/// `max_value` is not positive.
pub fn estimate_distribution(
    trace: &Trace,
    config: &DistributionConfig,
) -> Result<Distribution, AnalysisError> {
    config.validate()?;

    let mut counts = vec![0u64; config.bin_count];
    for w in trace.non_zero_readings() {
        counts[config.bin_index(w)] += 1;
    }

    let total = trace.len();
    let bins = if total == 0 {
        vec![0.0; config.bin_count]
    } else {
        counts
            .into_iter()
            .map(|c| c as f64 / total as f64)
            .collect()
    };

    debug!(
        "Estimated {}-bin distribution over {} samples ({:.1} W per bin)",
        config.bin_count,
        total,
        config.bin_width()
    );

    Ok(Distribution {
        config: *config,
        bins,
    })
}
