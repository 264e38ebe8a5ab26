//! Microcredential reference spreadsheet
//!
//! A single file listing one discipline per microcredential. The title doubles as
//! the discipline name, and the credential becomes `<code>_<title>`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::StringArray;
use arrow::record_batch::RecordBatch;

use crate::config::{PipelineConfig, SourceColumns};
use crate::error::Result;
use crate::loader::SourceLoader;
use crate::metadata::SourceKind;
use crate::reader::read_table;
use crate::schema::{CODE, DEPARTMENT, MICROCREDENTIAL, NAME, Normalization, normalize};
use crate::utils::arrow::{
    drop_column, move_to_front, rename_column, require_string_column, with_column,
};

/// Loader for the microcredential spreadsheet
#[derive(Debug, Clone)]
pub struct MicrocredentialLoader {
    path: PathBuf,
    columns: SourceColumns,
}

impl MicrocredentialLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, config: &PipelineConfig) -> Self {
        Self {
            path: path.into(),
            columns: config.columns.clone(),
        }
    }

    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.microcredential_file.clone(), config)
    }

    /// Reshape a loaded microcredential table
    pub fn reshape(&self, raw: &RecordBatch, path: &Path) -> Result<RecordBatch> {
        let cols = &self.columns;
        let codes = require_string_column(raw, &cols.microcredential_code, path)?;
        let titles = require_string_column(raw, &cols.microcredential_title, path)?;

        let credentials: StringArray = codes
            .iter()
            .zip(titles.iter())
            .map(|(code, title)| match (code, title) {
                (Some(c), Some(t)) => Some(format!("{c}_{t}")),
                (Some(v), None) | (None, Some(v)) => Some(v.to_string()),
                (None, None) => None,
            })
            .collect();
        let names = Arc::new(titles.clone());

        let mut batch = with_column(raw, NAME, names)?;
        if cols.microcredential_title != MICROCREDENTIAL {
            batch = drop_column(&batch, &cols.microcredential_title)?;
        }
        batch = with_column(&batch, MICROCREDENTIAL, Arc::new(credentials))?;
        batch = drop_column(&batch, &cols.microcredential_code)?;
        batch = rename_column(&batch, &cols.microcredential_department, DEPARTMENT)?;

        let spec = Normalization {
            code_column: &cols.code,
            name_column: NAME,
            marker_column: None,
            exclusion_marker: "",
            stamps: Vec::new(),
        };
        let batch = normalize(&batch, &spec, path)?;
        move_to_front(&batch, &[CODE, NAME, DEPARTMENT, MICROCREDENTIAL])
    }
}

impl SourceLoader for MicrocredentialLoader {
    fn kind(&self) -> SourceKind {
        SourceKind::Microcredential
    }

    fn load(&self) -> Result<RecordBatch> {
        let raw = read_table(&self.path)?;
        let batch = self.reshape(&raw, &self.path)?;
        log::info!(
            "Loaded {} microcredentials from {}",
            batch.num_rows(),
            self.path.display()
        );
        Ok(batch)
    }
}
