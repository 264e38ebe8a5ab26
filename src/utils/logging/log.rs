//! Log messages for table reads, artifact writes and skipped source files

use std::path::Path;
use std::time::Duration;

use arrow::record_batch::RecordBatch;

use crate::error::CurriculumError;
use crate::utils::io::{OutputFormat, SpreadsheetEntry};

/// Log a source table read from disk
pub fn log_table_read(path: &Path, table: &RecordBatch, elapsed: Duration) {
    log::info!(
        "Read {} rows x {} columns from {} in {elapsed:?}",
        table.num_rows(),
        table.num_columns(),
        path.display()
    );
}

/// Log an artifact written to disk
pub fn log_table_written(path: &Path, table: &RecordBatch, format: OutputFormat) {
    log::debug!(
        "Wrote {} rows as {} to {}",
        table.num_rows(),
        format.extension(),
        path.display()
    );
}

/// Log a spreadsheet left out of its source under skip-and-continue loading
pub fn log_skipped_file(entry: &SpreadsheetEntry, error: &CurriculumError) {
    log::warn!(
        "Skipping {} file {}: {error}",
        entry.kind,
        entry.path.display()
    );
}
