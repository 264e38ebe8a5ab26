//! Module for reading source spreadsheets into string tables.
//!
//! The first worksheet of a workbook (or the whole CSV file) is read; its first
//! row is the header. Rows whose cells are all empty are skipped. The workbook
//! or CSV reader is owned by the reading function and released before it
//! returns, on success and on error alike.

use std::path::Path;
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use calamine::{Reader, open_workbook_auto};

use crate::error::util::{safe_open_file, validate_file};
use crate::error::{CurriculumError, Result};
use crate::utils::arrow::table_from_rows;
use crate::utils::logging::log_table_read;

pub mod cells;

use cells::{cell_to_string, text_cell, unique_headers};

/// File extensions accepted as spreadsheets
pub const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xls", "xlsm", "ods", "csv"];

/// Whether a path carries a spreadsheet extension
#[must_use]
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(e))
        })
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Read a spreadsheet or CSV file into a table of string columns
pub fn read_table(path: &Path) -> Result<RecordBatch> {
    let start = Instant::now();
    validate_file(path)?;

    let (headers, rows) = if is_csv(path) {
        read_csv_rows(path)?
    } else {
        read_workbook_rows(path)?
    };

    let batch = table_from_rows(headers, rows)?;
    log_table_read(path, &batch, start.elapsed());
    Ok(batch)
}

type Rows = (Vec<String>, Vec<Vec<Option<String>>>);

fn keep_row(row: &[Option<String>]) -> bool {
    row.iter().any(Option::is_some)
}

fn read_workbook_rows(path: &Path) -> Result<Rows> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| CurriculumError::spreadsheet(path, e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CurriculumError::spreadsheet(path, "No worksheet found"))?
        .map_err(|e| CurriculumError::spreadsheet(path, e.to_string()))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .ok_or_else(|| CurriculumError::spreadsheet(path, "Worksheet is empty"))?
        .iter()
        .map(cell_to_string)
        .collect();

    let body = rows
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|row| keep_row(row))
        .collect();

    Ok((unique_headers(headers), body))
}

fn read_csv_rows(path: &Path) -> Result<Rows> {
    let file = safe_open_file(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.iter().map(text_cell).collect();

    let mut body = Vec::new();
    for record in reader.records() {
        let row: Vec<Option<String>> = record?.iter().map(text_cell).collect();
        if keep_row(&row) {
            body.push(row);
        }
    }

    Ok((unique_headers(headers), body))
}
