//! Utilities for working with string-typed Arrow arrays.
//!
//! Every pipeline table stores its cells as nullable `Utf8`, so these helpers
//! only deal with `StringArray`.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, AsArray, StringArray, new_null_array};
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::error::{CurriculumError, Result};

/// Get a string column by name, or `None` if the table has no such column
///
/// # Errors
/// Returns an error if the column exists but is not `Utf8`
pub fn string_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<Option<&'a StringArray>> {
    let Ok(idx) = batch.schema().index_of(name) else {
        return Ok(None);
    };

    batch
        .column(idx)
        .as_string_opt::<i32>()
        .map(Some)
        .ok_or_else(|| {
            ArrowError::SchemaError(format!("Column '{name}' is not a string column")).into()
        })
}

/// Get a string column that the source file must provide
pub fn require_string_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
    path: &Path,
) -> Result<&'a StringArray> {
    string_column(batch, name)?.ok_or_else(|| CurriculumError::missing_column(name, path))
}

/// Create a column repeating one value (or absent) for every row
#[must_use]
pub fn constant_column(value: Option<&str>, len: usize) -> ArrayRef {
    match value {
        Some(v) => Arc::new(StringArray::from_iter_values(std::iter::repeat_n(v, len))),
        None => new_null_array(&DataType::Utf8, len),
    }
}

/// Apply a function to every present value of a string array
#[must_use]
pub fn map_strings<F>(array: &StringArray, f: F) -> StringArray
where
    F: Fn(&str) -> String,
{
    array.iter().map(|v| v.map(&f)).collect()
}

/// 1-based row numbers of absent or blank cells
#[must_use]
pub fn blank_rows(array: &StringArray) -> Vec<usize> {
    array
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_none_or(|s| s.trim().is_empty()))
        .map(|(i, _)| i + 1)
        .collect()
}
