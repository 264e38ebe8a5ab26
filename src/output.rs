//! Persisted artifacts of a pipeline run

use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::metadata::SourceKind;
use crate::utils::io::{OutputFormat, write_table};

/// File stem of the intermediate artifact for a source type
#[must_use]
pub const fn intermediate_stem(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Master => "MSC_combined",
        SourceKind::Specialization => "CE_combined",
        SourceKind::Microcredential => "UC_Microcredenciais",
    }
}

/// Path of the intermediate artifact for a source type inside `dir`
#[must_use]
pub fn intermediate_path(dir: &Path, kind: SourceKind, format: OutputFormat) -> PathBuf {
    dir.join(intermediate_stem(kind))
        .with_extension(format.extension())
}

/// Write each per-source table to `dir`
///
/// Returns the written paths in input order.
pub fn write_intermediates(
    dir: &Path,
    format: OutputFormat,
    tables: &[(SourceKind, RecordBatch)],
) -> Result<Vec<PathBuf>> {
    tables
        .iter()
        .map(|(kind, table)| {
            let path = intermediate_path(dir, *kind, format);
            write_table(table, &path)?;
            log::info!("Wrote {} {kind} rows to {}", table.num_rows(), path.display());
            Ok(path)
        })
        .collect()
}

/// Write the merged table
pub fn write_final(table: &RecordBatch, path: &Path) -> Result<()> {
    write_table(table, path)?;
    log::info!("Wrote {} disciplines to {}", table.num_rows(), path.display());
    Ok(())
}
