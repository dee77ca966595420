//! # Trace Reports
//!
//! A [`TraceReport`] bundles every analysis of one trace. Data conditions
//! that make a metric undefined (no non-zero readings, degenerate
//! periodicity) are recorded as [`MetricStatus::NotComputable`] instead of
//! failing, so a batch of traces always yields one report per trace.

mod display;


use log::{debug, info};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::analysis::{
    detect_load_changes, estimate_distribution, periodicity, power_stats, summarize,
    AnalysisConfig, AnalysisError, Characterization, Distribution, LoadChange, PowerStats,
    Summary,
};
use crate::trace::Trace;

/// Outcome of a metric that may be undefined for some traces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum MetricStatus<T> {
    /// The metric was computed
    Computed(T),
    /// The metric is undefined for this trace
    NotComputable(String),
}

impl<T> MetricStatus<T> {
    /// The computed value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            MetricStatus::Computed(v) => Some(v),
            MetricStatus::NotComputable(_) => None,
        }
    }

    /// Whether the metric was computed
    pub fn is_computed(&self) -> bool {
        matches!(self, MetricStatus::Computed(_))
    }

    /// Turn a data condition into `NotComputable`; parameter errors propagate
    fn from_result(result: Result<T, AnalysisError>) -> Result<Self, AnalysisError> {
        match result {
            Ok(v) => Ok(MetricStatus::Computed(v)),
            Err(e) if e.is_data_condition() => Ok(MetricStatus::NotComputable(e.to_string())),
            Err(e) => Err(e),
        }
    }
}

/// Every analysis of one trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceReport {
    /// Trace name
    pub name: String,
    /// Total number of samples
    pub samples: usize,
    /// Number of non-zero samples
    pub non_zero_samples: usize,
    /// Time covered by the trace in seconds
    pub duration_secs: Option<f64>,
    /// Power statistics of the non-zero readings
    pub power: MetricStatus<PowerStats>,
    /// Periodicity estimate (`gap-std`)
    pub periodicity: MetricStatus<f64>,
    /// Descriptive table of the non-zero readings
    pub summary: MetricStatus<Summary>,
    /// Power-level distribution
    pub distribution: Distribution,
    /// Readings flagged as potential changes of load
    pub load_changes: Vec<LoadChange>,
}

impl TraceReport {
    /// Analyze a trace.
    ///
    /// Fails only for invalid parameters in `config`.
    pub fn build(trace: &Trace, config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let name = trace.name().unwrap_or("trace").to_string();
        debug!("Analyzing {} ({} samples)", name, trace.len());

        let power = MetricStatus::from_result(power_stats(trace))?;
        let gap_std = match &power {
            MetricStatus::Computed(stats) => {
                MetricStatus::from_result(periodicity(trace, stats.std))?
            }
            MetricStatus::NotComputable(reason) => MetricStatus::NotComputable(reason.clone()),
        };

        Ok(Self {
            name,
            samples: trace.len(),
            non_zero_samples: trace.non_zero_count(),
            duration_secs: trace.duration_secs(),
            power,
            periodicity: gap_std,
            summary: MetricStatus::from_result(summarize(trace))?,
            distribution: estimate_distribution(trace, &config.distribution)?,
            load_changes: detect_load_changes(trace, &config.load_change)?,
        })
    }

    /// Full characterization, when every metric was computable
    pub fn characterization(&self) -> Option<Characterization> {
        let power = self.power.value()?;
        let gap_std = *self.periodicity.value()?;
        Some(Characterization {
            min: power.min,
            max: power.max,
            avg: power.avg,
            std: power.std,
            gap_std,
        })
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Analyze several independent traces, one report each, in input order.
///
/// With the `parallel` feature the traces are analyzed on the rayon pool.
pub fn analyze_all(
    traces: &[Trace],
    config: &AnalysisConfig,
) -> Result<Vec<TraceReport>, AnalysisError> {
    config.distribution.validate()?;
    info!("Analyzing {} traces", traces.len());

    #[cfg(feature = "parallel")]
    let reports = traces
        .par_iter()
        .map(|trace| TraceReport::build(trace, config))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let reports = traces
        .iter()
        .map(|trace| TraceReport::build(trace, config))
        .collect();

    reports
}
