//! Bring a raw source table into the canonical column layout

use std::path::Path;

use arrow::record_batch::RecordBatch;

use crate::error::{CurriculumError, Result};
use crate::filter::{BatchFilter, MarkerExclusionFilter};
use crate::schema::{CODE, NAME};
use crate::utils::arrow::{
    blank_rows, constant_column, move_to_front, rename_column, require_string_column,
    with_column,
};

/// How one source table maps onto the canonical layout
#[derive(Debug, Clone)]
pub struct Normalization<'a> {
    /// Source column holding the discipline code
    pub code_column: &'a str,
    /// Source column holding the discipline name
    pub name_column: &'a str,
    /// Column checked for the exclusion marker, if the source is filtered
    pub marker_column: Option<&'a str>,
    /// Placeholder text excluded from `marker_column`
    pub exclusion_marker: &'a str,
    /// Metadata columns stamped onto every row, placed after code and name
    pub stamps: Vec<(&'a str, Option<String>)>,
}

/// Normalize a raw table loaded from `path`
///
/// Steps:
/// 1. require the code, name and marker columns
/// 2. drop marker rows
/// 3. require a code on every remaining row
/// 4. rename the identity columns to their canonical names
/// 5. stamp the metadata columns and move them behind the identity columns
pub fn normalize(raw: &RecordBatch, spec: &Normalization<'_>, path: &Path) -> Result<RecordBatch> {
    require_string_column(raw, spec.code_column, path)?;
    require_string_column(raw, spec.name_column, path)?;

    let mut batch = match spec.marker_column {
        Some(column) => {
            let filter = MarkerExclusionFilter::new(column, spec.exclusion_marker);
            for required in filter.required_columns() {
                require_string_column(raw, &required, path)?;
            }
            filter.filter(raw)?
        }
        None => raw.clone(),
    };

    let codes = require_string_column(&batch, spec.code_column, path)?;
    if let Some(&row) = blank_rows(codes).first() {
        return Err(CurriculumError::MissingValue {
            column: spec.code_column.to_string(),
            row,
            path: path.to_path_buf(),
        });
    }

    batch = rename_column(&batch, spec.code_column, CODE)?;
    batch = rename_column(&batch, spec.name_column, NAME)?;

    let rows = batch.num_rows();
    for (column, value) in &spec.stamps {
        batch = with_column(&batch, column, constant_column(value.as_deref(), rows))?;
    }

    let mut front = vec![CODE, NAME];
    front.extend(spec.stamps.iter().map(|(c, _)| *c));
    move_to_front(&batch, &front)
}
