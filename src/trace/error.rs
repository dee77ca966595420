/// Errors that can occur while constructing a trace
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// Timestamp and reading sequences differ in length
    #[error("Length mismatch: {timestamps} timestamps, {readings} readings")]
    LengthMismatch {
        /// Number of timestamps
        timestamps: usize,
        /// Number of power readings
        readings: usize,
    },

    /// A power reading is NaN or infinite
    #[error("Non-finite power reading at index {index}: {value}")]
    NonFiniteReading {
        /// Position of the offending reading
        index: usize,
        /// The offending value
        value: f64,
    },

    /// A power reading is below zero
    #[error("Negative power reading at index {index}: {value}")]
    NegativeReading {
        /// Position of the offending reading
        index: usize,
        /// The offending value
        value: f64,
    },
}
