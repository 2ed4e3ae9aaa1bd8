//! Export error types.

use thiserror::Error;

/// Errors that can occur while staging records for ingestion.
#[derive(Debug, Error)]
pub enum ExportError {
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (e.g., creating the staging directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
