/// Errors that can occur while analyzing a trace
///
/// None of these are fatal to a surrounding batch run: callers can substitute
/// a sentinel ("not computable") and move on to the next metric or trace.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// The trace has no non-zero readings to compute statistics over
    #[error("Trace has no non-zero readings")]
    EmptyTrace,

    /// Fewer than two threshold crossings, so the gap deviation is undefined
    #[error("Periodicity not computable: {gaps} gap(s) with zero spread")]
    DegeneratePeriodicity {
        /// Number of gaps observed during the scan
        gaps: usize,
    },

    /// An analysis parameter is out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl AnalysisError {
    /// Whether the condition only concerns the data, not the caller's parameters
    pub fn is_data_condition(&self) -> bool {
        matches!(
            self,
            AnalysisError::EmptyTrace | AnalysisError::DegeneratePeriodicity { .. }
        )
    }
}
