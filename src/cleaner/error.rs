use crate::trace::TraceError;

/// Errors that can occur while cleaning a raw sensor export
#[derive(Debug, thiserror::Error)]
pub enum CleanerError {
    /// I/O error reading or writing a table
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A required column is absent from the header
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Cleaned rows do not form a valid trace
    #[error("Invalid trace: {0}")]
    TraceError(#[from] TraceError),
}
