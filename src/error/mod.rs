//! Error handling for the curriculum pipeline.

use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

use crate::metadata::{FilenameError, SourceKind};

pub mod util;

/// Specialized error type for the curriculum pipeline
#[derive(Debug, thiserror::Error)]
pub enum CurriculumError {
    /// Error opening or reading a file or directory
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory was expected
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A file was expected
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// A declared input location contains no qualifying spreadsheets
    #[error("No {source_kind} spreadsheets found in {}", path.display())]
    EmptySource {
        source_kind: SourceKind,
        path: PathBuf,
    },

    /// A file name does not follow the naming convention of its source type
    #[error("Malformed file name {}: {source}", path.display())]
    Filename {
        path: PathBuf,
        #[source]
        source: FilenameError,
    },

    /// The spreadsheet could not be parsed
    #[error("Spreadsheet error in {}: {message}", path.display())]
    Spreadsheet { path: PathBuf, message: String },

    /// A required column is absent from a loaded table
    #[error("Column '{column}' not found in {}", path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// A required cell is empty
    #[error("Row {row} of {} has no value in required column '{column}'", path.display())]
    MissingValue {
        column: String,
        row: usize,
        path: PathBuf,
    },

    /// The URL reference table maps one discipline code more than once
    #[error("Reference table lists discipline code '{code}' {count} times")]
    DuplicateReferenceKey { code: String, count: usize },

    /// One discipline code carries different names within the same program
    #[error("Discipline '{code}' has conflicting names: {}", names.join(" | "))]
    NameConflict { code: String, names: Vec<String> },

    /// Invalid or unreadable configuration
    #[error("Configuration error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error writing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error reading CSV data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error building a spreadsheet artifact
    #[error("Spreadsheet write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Error converting between typed records and record batches
    #[error("Record conversion error: {0}")]
    Records(#[from] serde_arrow::Error),
}

impl CurriculumError {
    /// Wrap an IO error with the path it occurred on
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a spreadsheet error for a file
    pub fn spreadsheet(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Spreadsheet {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a missing column error for a file
    pub fn missing_column(column: &str, path: impl AsRef<Path>) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Whether this error concerns a single input file and may be skipped
    /// when skip-and-continue loading is enabled
    #[must_use]
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::Io { .. }
                | Self::NotAFile(_)
                | Self::Filename { .. }
                | Self::Spreadsheet { .. }
                | Self::MissingColumn { .. }
                | Self::MissingValue { .. }
                | Self::Csv(_)
        )
    }
}

/// Result type for curriculum pipeline operations
pub type Result<T> = std::result::Result<T, CurriculumError>;
