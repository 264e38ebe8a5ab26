//! Source loaders for the three kinds of curricular spreadsheets
//!
//! Each loader turns one input location into a single canonical-layout table.
//! They share no state and can run in any order or in parallel.
//!
//! Available sources:
//! - Master's programs: `<dir>/<department>/<file>` curricular plans
//! - Specialization courses: one flat folder, one file per course
//! - Microcredentials: one reference spreadsheet

use arrow::record_batch::RecordBatch;
use rayon::prelude::*;

use crate::config::PipelineConfig;
use crate::error::{CurriculumError, Result};
use crate::metadata::SourceKind;
use crate::utils::arrow::concat_aligned;
use crate::utils::io::{SourceWalk, SpreadsheetEntry};
use crate::utils::logging::{file_progress_bar, finish_progress_bar, log_skipped_file};

pub mod master;
pub mod microcredential;
pub mod specialization;

pub use master::MasterLoader;
pub use microcredential::MicrocredentialLoader;
pub use specialization::SpecializationLoader;

/// Base trait for source loaders
pub trait SourceLoader: Send + Sync {
    /// Which source type this loader reads
    fn kind(&self) -> SourceKind;

    /// Load and normalize every file of the source
    fn load(&self) -> Result<RecordBatch>;
}

/// Execution options shared by the folder loaders
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub parallel: bool,
    pub skip_unreadable_files: bool,
    pub show_progress: bool,
}

impl From<&PipelineConfig> for LoadOptions {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            parallel: config.parallel,
            skip_unreadable_files: config.skip_unreadable_files,
            show_progress: config.show_progress,
        }
    }
}

/// Create the loaders for every source type of a configuration
#[must_use]
pub fn loaders_from_config(config: &PipelineConfig) -> Vec<Box<dyn SourceLoader>> {
    vec![
        Box::new(MasterLoader::from_config(config)),
        Box::new(SpecializationLoader::from_config(config)),
        Box::new(MicrocredentialLoader::from_config(config)),
    ]
}

/// Load every spreadsheet of a walk and concatenate the results
///
/// `load_file` may return several tables for one file. Results are combined in
/// walk order regardless of `options.parallel`.
pub(crate) fn load_walk<F>(
    walk: &SourceWalk,
    options: LoadOptions,
    load_file: F,
) -> Result<RecordBatch>
where
    F: Fn(&SpreadsheetEntry) -> Result<Vec<RecordBatch>> + Sync,
{
    let kind = walk.kind();
    let empty = || CurriculumError::EmptySource {
        source_kind: kind,
        path: walk.root().to_path_buf(),
    };

    let entries = walk.entries()?.collect::<Result<Vec<_>>>()?;
    if entries.is_empty() {
        return Err(empty());
    }
    log::info!(
        "Found {} {kind} spreadsheets in {}",
        entries.len(),
        walk.root().display()
    );

    let pb = file_progress_bar(entries.len() as u64, kind.label(), options.show_progress);
    let load_one = |entry: &SpreadsheetEntry| {
        let result = load_file(entry);
        pb.inc(1);
        result
    };
    let results: Vec<Result<Vec<RecordBatch>>> = if options.parallel {
        entries.par_iter().map(load_one).collect()
    } else {
        entries.iter().map(load_one).collect()
    };
    finish_progress_bar(&pb, None);

    let mut tables = Vec::new();
    for (entry, result) in entries.iter().zip(results) {
        match result {
            Ok(batches) => tables.extend(batches),
            Err(e) if options.skip_unreadable_files && e.is_per_file() => {
                log_skipped_file(entry, &e);
            }
            Err(e) => return Err(e),
        }
    }

    if tables.is_empty() {
        return Err(empty());
    }
    let combined = concat_aligned(&tables)?;
    log::info!(
        "Combined {} {kind} rows from {} tables",
        combined.num_rows(),
        tables.len()
    );
    Ok(combined)
}
