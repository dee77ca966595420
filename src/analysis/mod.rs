//! # Trace Analysis
//!
//! Pure, stateless computations over a borrowed [`Trace`](crate::trace::Trace):
//!
//! - [`characterize`]: min/max/mean/population std of the non-zero readings
//!   and a periodicity estimate (`gap-std`).
//! - [`estimate_distribution`]: fixed-resolution histogram of time spent at
//!   each power level, normalized by the total sample count.
//! - [`summarize`]: count/mean/std/quartiles table of the non-zero readings.
//! - [`detect_load_changes`]: running-mean deviation detector.
//!
//! Readings of exactly zero are idle artifacts of the outlet and never
//! contribute to statistics or histogram bins.
//!
//! None of these hold state, so the same trace can be analyzed from several
//! threads at once.

mod characterize;
mod config;
mod distribution;
mod error;
mod load_change;
pub mod periodicity;
pub mod stats;
mod summary;

#[cfg(test)]
mod tests;

pub use characterize::{characterize, power_stats, Characterization, Metric, PowerStats};
pub use config::AnalysisConfig;
pub use distribution::{estimate_distribution, Distribution, DistributionConfig};
pub use error::AnalysisError;
pub use load_change::{detect_load_changes, LoadChange, LoadChangeConfig};
pub use periodicity::{gap_lengths, periodicity, GapState, GapTracker};
pub use summary::{summarize, Summary};
