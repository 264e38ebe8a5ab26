//! One batch run: load every source, merge, persist
//!
//! The reference table is read before any curricular plan so that a broken
//! reference fails the run early.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use arrow::record_batch::RecordBatch;
use rayon::prelude::*;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::loader::{SourceLoader, loaders_from_config};
use crate::merge::{MergeOptions, MergeReport, ReferenceLinks, merge_sources};
use crate::metadata::SourceKind;
use crate::output::{write_final, write_intermediates};
use crate::utils::io::OutputFormat;

/// What a run loaded and wrote
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    /// Rows loaded per source type, in loader order
    pub source_rows: Vec<(SourceKind, usize)>,
    pub merge: MergeReport,
    pub output: PathBuf,
    pub intermediates: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Tables produced by a run before anything is written
#[derive(Debug, Clone)]
pub struct BuiltTable {
    pub sources: Vec<(SourceKind, RecordBatch)>,
    pub merged: RecordBatch,
    pub report: MergeReport,
}

/// Run every loader of the configuration
///
/// Loaders run on the rayon pool when `config.parallel` is set. The result keeps
/// loader order either way.
pub fn load_sources(config: &PipelineConfig) -> Result<Vec<(SourceKind, RecordBatch)>> {
    let loaders = loaders_from_config(config);
    if config.parallel {
        loaders.par_iter().map(|l| load_one(l.as_ref())).collect()
    } else {
        loaders.iter().map(|l| load_one(l.as_ref())).collect()
    }
}

fn load_one(loader: &dyn SourceLoader) -> Result<(SourceKind, RecordBatch)> {
    loader.load().map(|table| (loader.kind(), table))
}

/// Load and merge without persisting anything
pub fn build_table(config: &PipelineConfig) -> Result<BuiltTable> {
    let links = ReferenceLinks::load(&config.reference)?;
    let sources = load_sources(config)?;

    let tables = sources.iter().map(|(_, t)| t.clone()).collect::<Vec<_>>();
    let (merged, report) = merge_sources(&tables, &links, &MergeOptions::from(config))?;
    Ok(BuiltTable {
        sources,
        merged,
        report,
    })
}

/// Run the whole pipeline and write its artifacts
pub fn run(config: &PipelineConfig) -> Result<PipelineSummary> {
    let start = Instant::now();
    let built = build_table(config)?;

    let intermediates = match &config.output.intermediate_dir {
        Some(dir) => {
            let format = OutputFormat::from_path(&config.output.path);
            write_intermediates(dir, format, &built.sources)?
        }
        None => Vec::new(),
    };
    write_final(&built.merged, &config.output.path)?;

    let summary = PipelineSummary {
        source_rows: built
            .sources
            .iter()
            .map(|(kind, t)| (*kind, t.num_rows()))
            .collect(),
        merge: built.report,
        output: config.output.path.clone(),
        intermediates,
        elapsed: start.elapsed(),
    };
    log::info!(
        "Pipeline finished in {:?}: {} disciplines",
        summary.elapsed,
        summary.merge.output_rows
    );
    Ok(summary)
}
