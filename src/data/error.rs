use std::path::PathBuf;

use thiserror::Error;

/// Failures that make a passenger file unusable. There is no fallback data
/// source, so any of these aborts the load.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// `record` counts data records from 1, header excluded.
    #[error("record {record}: column '{column}' expects a number, got '{value}'")]
    NonNumericColumn {
        column: String,
        record: usize,
        value: String,
    },

    #[error("record {record}: survived flag must be 0 or 1, got '{value}'")]
    InvalidSurvivedFlag { record: usize, value: String },
}
