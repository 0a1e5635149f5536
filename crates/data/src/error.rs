use std::path::Path;
use thiserror::Error;

/// Result type for dataset loading
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors raised while reading the CSV datasets
#[derive(Error, Debug)]
pub enum DataError {
    /// The file could not be opened or read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be decoded
    #[error("Malformed CSV in {source_name} at row {row}: {detail}")]
    Malformed {
        source_name: String,
        row: u64,
        detail: String,
    },

    /// The header row lacks a required column
    #[error("Missing column '{column}' in {source_name}")]
    MissingColumn { source_name: String, column: String },
}

impl DataError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn malformed(source_name: impl Into<String>, row: u64, detail: impl Into<String>) -> Self {
        Self::Malformed {
            source_name: source_name.into(),
            row,
            detail: detail.into(),
        }
    }

    pub fn missing_column(source_name: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            source_name: source_name.into(),
            column: column.into(),
        }
    }
}
