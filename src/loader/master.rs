//! Master's program curricular plans
//!
//! Files live in one folder per department. The program label, and the branch or
//! pathway if any, come from the file name.

use std::path::PathBuf;

use arrow::record_batch::RecordBatch;

use crate::config::{PipelineConfig, SourceColumns};
use crate::error::{CurriculumError, Result};
use crate::loader::{LoadOptions, SourceLoader, load_walk};
use crate::metadata::{SourceKind, parse_master_filename};
use crate::reader::read_table;
use crate::schema::{DEPARTMENT, MASTER, Normalization, TRACK, normalize};
use crate::utils::io::{SourceWalk, SpreadsheetEntry};

/// Loader for the master's program tree
#[derive(Debug, Clone)]
pub struct MasterLoader {
    walk: SourceWalk,
    columns: SourceColumns,
    prefix_len: usize,
    marker: String,
    options: LoadOptions,
}

impl MasterLoader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: &PipelineConfig) -> Self {
        Self {
            walk: SourceWalk::master(root),
            columns: config.columns.clone(),
            prefix_len: config.master_prefix_len,
            marker: config.free_elective_marker.clone(),
            options: LoadOptions::from(config),
        }
    }

    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.master_dir.clone(), config)
    }

    fn load_file(&self, entry: &SpreadsheetEntry) -> Result<RecordBatch> {
        let department = entry.department.as_deref().unwrap_or_default();
        let meta = parse_master_filename(department, entry.file_name(), self.prefix_len)
            .map_err(|source| CurriculumError::Filename {
                path: entry.path.clone(),
                source,
            })?;
        log::debug!(
            "{}: department {}, program {}, track {:?}",
            entry.path.display(),
            meta.department,
            meta.program,
            meta.track
        );

        let raw = read_table(&entry.path)?;
        let spec = Normalization {
            code_column: &self.columns.code,
            name_column: &self.columns.name,
            marker_column: Some(&self.columns.generic_name),
            exclusion_marker: &self.marker,
            stamps: vec![
                (DEPARTMENT, Some(meta.department)),
                (MASTER, Some(meta.program)),
                (TRACK, meta.track),
            ],
        };
        normalize(&raw, &spec, &entry.path)
    }
}

impl SourceLoader for MasterLoader {
    fn kind(&self) -> SourceKind {
        SourceKind::Master
    }

    fn load(&self) -> Result<RecordBatch> {
        load_walk(&self.walk, self.options, |entry| {
            self.load_file(entry).map(|t| vec![t])
        })
    }
}
