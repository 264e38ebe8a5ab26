//! Specialization (continuing-education) course plans
//!
//! One file per course, shared by every department listed in its name. Each
//! department gets its own copy of the rows.

use std::path::PathBuf;

use arrow::record_batch::RecordBatch;

use crate::config::{PipelineConfig, SourceColumns};
use crate::error::{CurriculumError, Result};
use crate::loader::{LoadOptions, SourceLoader, load_walk};
use crate::metadata::{SourceKind, parse_specialization_filename};
use crate::reader::read_table;
use crate::schema::{CODE, DEPARTMENT, NAME, Normalization, SPECIALIZATION, normalize};
use crate::utils::arrow::{constant_column, move_to_front, with_column};
use crate::utils::io::{SourceWalk, SpreadsheetEntry};

/// Loader for the flat specialization folder
#[derive(Debug, Clone)]
pub struct SpecializationLoader {
    walk: SourceWalk,
    columns: SourceColumns,
    marker: String,
    options: LoadOptions,
}

impl SpecializationLoader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: &PipelineConfig) -> Self {
        Self {
            walk: SourceWalk::specialization(root),
            columns: config.columns.clone(),
            marker: config.free_elective_marker.clone(),
            options: LoadOptions::from(config),
        }
    }

    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.specialization_dir.clone(), config)
    }

    fn load_file(&self, entry: &SpreadsheetEntry) -> Result<Vec<RecordBatch>> {
        let meta = parse_specialization_filename(entry.file_name()).map_err(|source| {
            CurriculumError::Filename {
                path: entry.path.clone(),
                source,
            }
        })?;

        let raw = read_table(&entry.path)?;
        let spec = Normalization {
            code_column: &self.columns.code,
            name_column: &self.columns.name,
            marker_column: Some(&self.columns.name),
            exclusion_marker: &self.marker,
            stamps: vec![(SPECIALIZATION, Some(meta.program))],
        };
        let course = normalize(&raw, &spec, &entry.path)?;

        let rows = course.num_rows();
        meta.departments
            .iter()
            .map(|department| {
                let stamp = constant_column(Some(department.as_str()), rows);
                let copy = with_column(&course, DEPARTMENT, stamp)?;
                move_to_front(&copy, &[CODE, NAME, SPECIALIZATION, DEPARTMENT])
            })
            .collect()
    }
}

impl SourceLoader for SpecializationLoader {
    fn kind(&self) -> SourceKind {
        SourceKind::Specialization
    }

    fn load(&self) -> Result<RecordBatch> {
        load_walk(&self.walk, self.options, |entry| self.load_file(entry))
    }
}
