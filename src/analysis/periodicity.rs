//! Crude periodicity estimate from the spacing of above-threshold excursions.
//!
//! The reading sequence is scanned once. Runs of consecutive samples at or
//! below the threshold are measured in samples; each run that is ended by an
//! above-threshold sample is recorded as a gap. A regular signal produces
//! gaps of similar length, so the inverse spread of the gaps grows with
//! regularity.

use super::stats;
use super::AnalysisError;
use crate::trace::Trace;

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapState {
    /// Inside a run of at-or-below-threshold samples of the given length
    InGap(usize),
    /// Inside a run of above-threshold samples
    AboveThreshold,
}

/// Two-state machine turning a reading sequence into gap lengths
#[derive(Debug, Clone)]
pub struct GapTracker {
    threshold: f64,
    state: GapState,
    gaps: Vec<usize>,
}

impl GapTracker {
    /// Start a scan; a leading above-threshold run records nothing
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            state: GapState::AboveThreshold,
            gaps: Vec::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> GapState {
        self.state
    }

    /// Feed the next reading
    pub fn observe(&mut self, watts: f64) {
        let above = watts > self.threshold;
        self.state = match (self.state, above) {
            (GapState::AboveThreshold, false) => GapState::InGap(1),
            (GapState::AboveThreshold, true) => GapState::AboveThreshold,
            (GapState::InGap(run), false) => GapState::InGap(run + 1),
            (GapState::InGap(run), true) => {
                self.gaps.push(run);
                GapState::AboveThreshold
            }
        };
    }

    /// Finish the scan. A run still open at the end is not a gap.
    pub fn finish(self) -> Vec<usize> {
        self.gaps
    }
}

/// Lengths of the below-threshold runs that end in an above-threshold sample
pub fn gap_lengths(readings: &[f64], threshold: f64) -> Vec<usize> {
    let mut tracker = GapTracker::new(threshold);
    for &w in readings {
        tracker.observe(w);
    }
    tracker.finish()
}

/// Inverse population standard deviation of the gap lengths of the full
/// (unfiltered) reading sequence.
///
/// Fails with [`AnalysisError::DegeneratePeriodicity`] when no gap was seen
/// or all gaps have the same length.
pub fn periodicity(trace: &Trace, threshold: f64) -> Result<f64, AnalysisError> {
    let gaps: Vec<f64> = gap_lengths(trace.readings(), threshold)
        .into_iter()
        .map(|g| g as f64)
        .collect();

    match stats::population_std(&gaps) {
        Some(spread) if spread > 0.0 => Ok(1.0 / spread),
        _ => Err(AnalysisError::DegeneratePeriodicity { gaps: gaps.len() }),
    }
}
