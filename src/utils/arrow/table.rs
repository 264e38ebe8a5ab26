//! Named-column table operations over record batches
//!
//! Columns are always addressed by name. Position-based reordering is never
//! used, so a file with extra or shuffled columns cannot shift the canonical
//! layout.

use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, StringArray, new_null_array};
use arrow::compute::{concat_batches, filter_record_batch};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::row::{RowConverter, SortField};
use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::error::Result;

/// Build a schema of nullable string columns
#[must_use]
pub fn string_schema<S: AsRef<str>>(names: &[S]) -> SchemaRef {
    Arc::new(Schema::new(
        names
            .iter()
            .map(|n| Field::new(n.as_ref(), DataType::Utf8, true))
            .collect_vec(),
    ))
}

/// Build a table from a header and row-major cells
///
/// Short rows are padded with absent cells; cells beyond the header are dropped.
pub fn table_from_rows(
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
) -> Result<RecordBatch> {
    let width = headers.len();
    let mut columns: Vec<Vec<Option<String>>> =
        (0..width).map(|_| Vec::with_capacity(rows.len())).collect();

    for mut row in rows {
        row.resize(width, None);
        for (col, cell) in columns.iter_mut().zip(row) {
            col.push(cell);
        }
    }

    let arrays = columns
        .into_iter()
        .map(|c| Arc::new(StringArray::from(c)) as ArrayRef)
        .collect_vec();

    Ok(RecordBatch::try_new(string_schema(&headers), arrays)?)
}

/// Column names of a table, in order
#[must_use]
pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}

/// Set a column, replacing a same-named column in place or appending it
pub fn with_column(batch: &RecordBatch, name: &str, array: ArrayRef) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields = schema.fields().iter().cloned().collect_vec();
    let mut columns = batch.columns().to_vec();
    let field = Arc::new(Field::new(name, array.data_type().clone(), true));

    match schema.index_of(name) {
        Ok(idx) => {
            fields[idx] = field;
            columns[idx] = array;
        }
        Err(_) => {
            fields.push(field);
            columns.push(array);
        }
    }

    Ok(RecordBatch::try_new(
        Arc::new(Schema::new(fields)),
        columns,
    )?)
}

/// Remove a column if present
pub fn drop_column(batch: &RecordBatch, name: &str) -> Result<RecordBatch> {
    match batch.schema().index_of(name) {
        Ok(idx) => {
            let keep = (0..batch.num_columns()).filter(|&i| i != idx).collect_vec();
            Ok(batch.project(&keep)?)
        }
        Err(_) => Ok(batch.clone()),
    }
}

/// Rename a column if present
///
/// An existing column already carrying the new name is dropped first.
pub fn rename_column(batch: &RecordBatch, from: &str, to: &str) -> Result<RecordBatch> {
    if from == to || batch.schema().index_of(from).is_err() {
        return Ok(batch.clone());
    }
    let batch = drop_column(batch, to)?;
    let schema = batch.schema();
    let fields = schema
        .fields()
        .iter()
        .map(|f| {
            if f.name() == from {
                Arc::new(f.as_ref().clone().with_name(to))
            } else {
                f.clone()
            }
        })
        .collect_vec();

    Ok(RecordBatch::try_new(
        Arc::new(Schema::new(fields)),
        batch.columns().to_vec(),
    )?)
}

/// Move the named columns to the front, keep the rest in their original order
///
/// Names not present in the table are skipped.
pub fn move_to_front(batch: &RecordBatch, front: &[&str]) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut order = front
        .iter()
        .filter_map(|n| schema.index_of(n).ok())
        .unique()
        .collect_vec();
    let rest = (0..batch.num_columns())
        .filter(|i| !order.contains(i))
        .collect_vec();
    order.extend(rest);

    Ok(batch.project(&order)?)
}

/// Project to exactly the given columns, materializing missing ones as absent
pub fn select_columns(batch: &RecordBatch, names: &[&str]) -> Result<RecordBatch> {
    let schema = batch.schema();
    let columns = names
        .iter()
        .map(|n| match schema.index_of(n) {
            Ok(idx) => batch.column(idx).clone(),
            Err(_) => new_null_array(&DataType::Utf8, batch.num_rows()),
        })
        .collect_vec();

    Ok(RecordBatch::try_new(string_schema(names), columns)?)
}

/// Row-wise union of tables with columns aligned by name
///
/// The result has every column seen in any input, in first-seen order. Rows
/// from a table lacking a column get absent values for it.
pub fn concat_aligned(tables: &[RecordBatch]) -> Result<RecordBatch> {
    if tables.is_empty() {
        return Err(ArrowError::InvalidArgumentError(
            "Cannot concatenate an empty list of tables".to_string(),
        )
        .into());
    }

    let names = tables
        .iter()
        .flat_map(column_names)
        .unique()
        .collect_vec();
    let names = names.iter().map(String::as_str).collect_vec();

    let aligned = tables
        .iter()
        .map(|t| select_columns(t, &names))
        .collect::<Result<Vec<_>>>()?;

    Ok(concat_batches(&string_schema(&names), &aligned)?)
}

/// Keep rows where the mask is true
pub fn filter_rows(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    Ok(filter_record_batch(batch, mask)?)
}

/// Drop rows identical to an earlier row across every column
pub fn dedup_rows(batch: &RecordBatch) -> Result<RecordBatch> {
    if batch.num_rows() == 0 {
        return Ok(batch.clone());
    }

    let converter = RowConverter::new(
        batch
            .schema()
            .fields()
            .iter()
            .map(|f| SortField::new(f.data_type().clone()))
            .collect(),
    )?;
    let rows = converter.convert_columns(batch.columns())?;

    let mut seen = FxHashSet::default();
    let mask: BooleanArray = rows.iter().map(|row| Some(seen.insert(row))).collect();

    filter_rows(batch, &mask)
}
