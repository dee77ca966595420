//! # Power Traces
//!
//! A [`Trace`] is one device's power draw over time: an ordered pair of
//! aligned sequences holding timestamps (seconds since the Unix epoch) and
//! power readings (watts).
//!
//! Traces are produced by the [`loader`](crate::loader) or the
//! [`cleaner`](crate::cleaner) and are never mutated afterwards; every
//! analysis in [`analysis`](crate::analysis) borrows them read-only.

mod error;
mod types;


pub use error::TraceError;
pub use types::{Sample, Trace};
