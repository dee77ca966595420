//! # powertrace - Appliance Power-Trace Characterization
//!
//! `powertrace` analyzes power-consumption logs recorded by smart outlets
//! (PLC devices) to characterize the appliance plugged into them.
//!
//! ## Key Features
//!
//! - **Characterization**: min, max, mean and population standard deviation of
//!   the non-zero readings, plus a periodicity estimate derived from how
//!   regularly the signal rises above one standard deviation.
//!
//! - **Power-Level Distribution**: fixed-resolution histogram of the fraction
//!   of samples spent at each power level.
//!
//! - **Load-Change Detection**: flags readings that deviate strongly from the
//!   running mean, a hint that the appliance was swapped.
//!
//! - **Export Cleaning**: turns raw database exports into a tidy
//!   time/power/energy table.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use powertrace::analysis::{characterize, estimate_distribution, DistributionConfig};
//! use powertrace::loader::load_trace;
//!
//! let printer = load_trace("data/printer-data.csv")?;
//!
//! let ch = characterize(&printer)?;
//! println!("avg {} W, std {} W, periodicity {}", ch.avg, ch.std, ch.gap_std);
//!
//! let dist = estimate_distribution(&printer, &DistributionConfig::new(1000, 1000.0))?;
//! println!("{:.1}% of samples above idle", dist.total_mass() * 100.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Zero Readings
//!
//! A reading of exactly 0 W means the outlet is unused or nothing is plugged
//! in. Zeros are excluded from every statistic and histogram bin, but the
//! distribution is still normalized by the total number of samples, so it
//! sums to the fraction of non-zero samples rather than to 1.
//!
//! ## Input Format
//!
//! | Column | Format | Description |
//! |--------|--------|-------------|
//! | time | `YYYY-MM-DD HH:MM:SS` | Reading time (UTC) |
//! | value | integer | Power in milliwatts |

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod analysis;
pub mod cleaner;
pub mod loader;
pub mod report;
pub mod trace;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::analysis::{
        characterize, detect_load_changes, estimate_distribution, power_stats, summarize,
        AnalysisConfig, AnalysisError, Characterization, Distribution, DistributionConfig,
        LoadChange, LoadChangeConfig, Metric, PowerStats, Summary,
    };
    pub use crate::cleaner::{CleanedRecord, CleanedTable, CleanerConfig, CleanerError, DataCleaner};
    pub use crate::loader::{load_trace, LoaderConfig, LoaderError, TraceLoader};
    pub use crate::report::{analyze_all, MetricStatus, TraceReport};
    pub use crate::trace::{Sample, Trace, TraceError};
}
