use crate::trace::TraceError;

/// Errors that can occur while loading a power log
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// I/O error reading the log file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Delimited-text parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// A row has fewer than two columns
    #[error("Line {line}: expected a timestamp and a power column")]
    MissingField {
        /// 1-based line number
        line: u64,
    },

    /// The timestamp column does not match the configured pattern
    #[error("Line {line}: invalid timestamp '{value}'")]
    InvalidTimestamp {
        /// 1-based line number
        line: u64,
        /// Raw column text
        value: String,
    },

    /// The power column is not a number
    #[error("Line {line}: invalid power value '{value}'")]
    InvalidPower {
        /// 1-based line number
        line: u64,
        /// Raw column text
        value: String,
    },

    /// Loader configuration is unusable
    #[error("Invalid loader configuration: {0}")]
    InvalidConfig(String),

    /// Loaded columns do not form a valid trace
    #[error("Invalid trace: {0}")]
    TraceError(#[from] TraceError),
}
