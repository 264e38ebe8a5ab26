//! Writing tables to XLSX, Parquet or CSV artifacts

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use arrow::array::AsArray;
use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook, XlsxError};
use tempfile::NamedTempFile;

use crate::error::{CurriculumError, Result};
use crate::utils::logging::log_table_written;

/// Artifact file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Parquet,
    Csv,
}

impl OutputFormat {
    /// Pick the format from a file extension; anything but `.xlsx` or `.csv` is Parquet
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => Self::Xlsx,
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Parquet,
        }
    }

    /// File extension for artifacts of this format
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }
}

/// Write a table to `path`, replacing any previous file
///
/// The table is written to a hidden temporary file next to `path` and then
/// renamed over it, so a failed write leaves the previous artifact in place.
pub fn write_table(batch: &RecordBatch, path: &Path) -> Result<()> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent,
        None => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| CurriculumError::io(dir, e))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".curricula-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| CurriculumError::io(dir, e))?;

    let format = OutputFormat::from_path(path);
    match format {
        OutputFormat::Xlsx => {
            let bytes = xlsx_bytes(batch)?;
            tmp.write_all(&bytes)
                .map_err(|e| CurriculumError::io(tmp.path(), e))?;
        }
        OutputFormat::Parquet => {
            let props = WriterProperties::builder()
                .set_compression(Compression::SNAPPY)
                .build();
            let mut writer = ArrowWriter::try_new(tmp.as_file_mut(), batch.schema(), Some(props))?;
            writer.write(batch)?;
            writer.close()?;
        }
        OutputFormat::Csv => write_csv(batch, &mut tmp)?,
    }

    tmp.persist(path)
        .map_err(|e| CurriculumError::io(path, e.error))?;
    log_table_written(path, batch, format);
    Ok(())
}

fn write_csv(batch: &RecordBatch, tmp: &mut NamedTempFile) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .with_header(true)
        .build(BufWriter::new(tmp.as_file_mut()));
    writer.write(batch)?;
    let flushed = writer.into_inner().flush();
    flushed.map_err(|e| CurriculumError::io(tmp.path(), e))
}

/// Render a table as a single-sheet workbook
///
/// Header names fill the first row. Absent cells stay blank. The document
/// creation time is pinned so identical tables give identical files.
fn xlsx_bytes(batch: &RecordBatch) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let sheet = workbook.add_worksheet();
    for (idx, field) in batch.schema().fields().iter().enumerate() {
        let col = u16::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)?;
        sheet.write_string(0, col, field.name())?;

        let Some(values) = batch.column(idx).as_string_opt::<i32>() else {
            continue;
        };
        for (row, value) in values.iter().enumerate() {
            let Some(value) = value else { continue };
            let row = u32::try_from(row + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            sheet.write_string(row, col, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
