//! Row filters for curriculum tables
//!
//! This module defines the common filter trait and the placeholder-exclusion
//! filter applied by every loader and again by the merge stage.

use std::collections::HashSet;

use arrow::array::BooleanArray;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::arrow::{filter_rows, string_column};

/// Marker identifying free-elective placeholder rows in curricular plans
pub const FREE_ELECTIVE_MARKER: &str = "OPÇÃO LIVRE";

/// Broader marker excluding every option placeholder after merge
pub const OPTION_MARKER: &str = "OPÇÃO";

/// Trait for objects that can filter record batches
pub trait BatchFilter: std::fmt::Debug {
    /// Filter a record batch
    ///
    /// # Errors
    /// Returns an error if filtering fails
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch>;

    /// Returns the set of column names required by this filter
    fn required_columns(&self) -> HashSet<String>;
}

/// Drops rows whose column contains a marker, compared case-insensitively
///
/// Absent cells never match and are kept.
#[derive(Debug, Clone)]
pub struct MarkerExclusionFilter {
    column: String,
    marker: String,
}

impl MarkerExclusionFilter {
    /// Create a filter for the given column and marker text
    #[must_use]
    pub fn new(column: impl Into<String>, marker: &str) -> Self {
        Self {
            column: column.into(),
            marker: marker.to_uppercase(),
        }
    }

    /// Build the keep-mask for a batch
    fn keep_mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let values = string_column(batch, &self.column)?.ok_or_else(|| {
            ArrowError::SchemaError(format!("Column '{}' not found", self.column))
        })?;

        Ok(values
            .iter()
            .map(|v| Some(!v.is_some_and(|s| self.matches(s))))
            .collect())
    }

    /// Whether a single value contains the marker
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        !self.marker.is_empty() && value.to_uppercase().contains(&self.marker)
    }
}

impl BatchFilter for MarkerExclusionFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let mask = self.keep_mask(batch)?;
        let filtered = filter_rows(batch, &mask)?;

        let dropped = batch.num_rows() - filtered.num_rows();
        if dropped > 0 {
            log::debug!(
                "Excluded {dropped} rows with '{}' in column {}",
                self.marker,
                self.column
            );
        }
        Ok(filtered)
    }

    fn required_columns(&self) -> HashSet<String> {
        HashSet::from([self.column.clone()])
    }
}
