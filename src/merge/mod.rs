//! Merge and enrichment of the per-source tables
//!
//! The merge stage is the only place allowed to change loader output. It
//! concatenates, attaches URLs, upper-cases names and departments, drops option
//! placeholders, projects to the canonical columns and removes duplicate rows.

use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::config::{ConflictPolicy, PipelineConfig};
use crate::error::{CurriculumError, Result};
use crate::filter::{BatchFilter, FREE_ELECTIVE_MARKER, MarkerExclusionFilter};
use crate::schema::{CANONICAL_COLUMNS, CanonicalRecord, DEPARTMENT, NAME};
use crate::utils::arrow::{
    concat_aligned, dedup_rows, map_strings, select_columns, string_column, with_column,
};

pub mod links;

pub use links::ReferenceLinks;

/// Settings of the merge stage
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Placeholder text removed from discipline names, on top of the
    /// free-elective marker which is always removed
    pub exclusion_marker: String,
    pub conflict_policy: ConflictPolicy,
}

impl From<&PipelineConfig> for MergeOptions {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            exclusion_marker: config.merge_exclusion_marker.clone(),
            conflict_policy: config.conflict_policy,
        }
    }
}

/// Row counts collected while merging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Rows after concatenation
    pub input_rows: usize,
    /// Rows that received a resource URL
    pub urls_attached: usize,
    /// Rows dropped by the placeholder filter
    pub excluded_rows: usize,
    /// Rows dropped as exact duplicates
    pub duplicate_rows: usize,
    /// Discipline/program keys with more than one name
    pub name_conflicts: usize,
    /// Rows in the final table
    pub output_rows: usize,
}

/// Merge the loader outputs into the final canonical table
pub fn merge_sources(
    tables: &[RecordBatch],
    links: &ReferenceLinks,
    options: &MergeOptions,
) -> Result<(RecordBatch, MergeReport)> {
    let mut report = MergeReport::default();

    let combined = concat_aligned(tables)?;
    report.input_rows = combined.num_rows();

    let (mut batch, attached) = links.attach(&combined)?;
    report.urls_attached = attached;

    for column in [NAME, DEPARTMENT] {
        batch = uppercase_column(&batch, column)?;
    }

    let before = batch.num_rows();
    for marker in exclusion_markers(options) {
        batch = MarkerExclusionFilter::new(NAME, marker).filter(&batch)?;
    }
    report.excluded_rows = before - batch.num_rows();

    let batch = select_columns(&batch, &CANONICAL_COLUMNS)?;
    let before = batch.num_rows();
    let batch = dedup_rows(&batch)?;
    report.duplicate_rows = before - batch.num_rows();

    report.name_conflicts = check_name_conflicts(&batch, options.conflict_policy)?;
    report.output_rows = batch.num_rows();

    log::info!(
        "Merged {} rows into {} ({} URLs attached, {} excluded, {} duplicates removed)",
        report.input_rows,
        report.output_rows,
        report.urls_attached,
        report.excluded_rows,
        report.duplicate_rows
    );
    Ok((batch, report))
}

/// Markers removed after merge; the free-elective marker cannot be configured away
fn exclusion_markers(options: &MergeOptions) -> Vec<&str> {
    let mut markers = vec![FREE_ELECTIVE_MARKER];
    let configured = options.exclusion_marker.trim();
    if !configured.is_empty() {
        markers.push(configured);
    }
    markers
}

fn uppercase_column(batch: &RecordBatch, column: &str) -> Result<RecordBatch> {
    match string_column(batch, column)? {
        Some(values) => {
            let upper = map_strings(values, str::to_uppercase);
            with_column(batch, column, Arc::new(upper))
        }
        None => Ok(batch.clone()),
    }
}

/// Find discipline codes named differently within the same program
///
/// Returns the number of conflicting keys when the policy allows them.
fn check_name_conflicts(batch: &RecordBatch, policy: ConflictPolicy) -> Result<usize> {
    let records = CanonicalRecord::from_batch(batch)?;

    let mut names: FxHashMap<(&str, [Option<&str>; 4]), Vec<&str>> = FxHashMap::default();
    let mut order = Vec::new();
    for record in &records {
        let key = (record.discipline_code.as_str(), record.program_key());
        let name = record.discipline_name.as_deref().unwrap_or_default();
        let seen = names.entry(key).or_insert_with(|| {
            order.push(key);
            Vec::new()
        });
        if !seen.contains(&name) {
            seen.push(name);
        }
    }

    let conflicts = order
        .into_iter()
        .filter_map(|key| {
            let spellings = &names[&key];
            (spellings.len() > 1).then_some((key, spellings))
        })
        .collect_vec();

    for ((code, program), spellings) in &conflicts {
        let program = program.iter().flatten().join(" / ");
        match policy {
            ConflictPolicy::Fail => {
                return Err(CurriculumError::NameConflict {
                    code: (*code).to_string(),
                    names: spellings.iter().map(|s| (*s).to_string()).collect(),
                });
            }
            ConflictPolicy::Warn => log::warn!(
                "Discipline {code} in {program} has {} names: {}",
                spellings.len(),
                spellings.join(" | ")
            ),
        }
    }
    Ok(conflicts.len())
}
