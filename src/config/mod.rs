//! Configuration for the curriculum pipeline.
//!
//! Every field has a default matching the institutional data layout, so a
//! configuration file only needs the values it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CurriculumError, Result};
use crate::filter::{FREE_ELECTIVE_MARKER, OPTION_MARKER};
use crate::metadata::MASTER_PREFIX_LEN;

/// Column names expected in the source spreadsheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceColumns {
    /// Discipline code in master and specialization files
    pub code: String,
    /// Discipline name in master and specialization files
    pub name: String,
    /// Generic discipline name, checked for free electives in master files
    pub generic_name: String,
    /// Microcredential numeric code
    pub microcredential_code: String,
    /// Microcredential title
    pub microcredential_title: String,
    /// Optional department column of the microcredential file
    pub microcredential_department: String,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            code: "CODDISCIPLINACOD".to_string(),
            name: "NOMEDISCIPLINA".to_string(),
            generic_name: "NOMEDISCIPLINAGENERICA".to_string(),
            microcredential_code: "CODIGOMICROCREDENCIAL".to_string(),
            microcredential_title: "Microcredencial".to_string(),
            microcredential_department: "Department".to_string(),
        }
    }
}

/// The URL reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Reference spreadsheet path
    pub path: PathBuf,
    /// Column holding the discipline code
    pub code_column: String,
    /// Column holding the resource URL
    pub url_column: String,
    /// Collapse repeated codes that map to the same URL instead of failing
    pub collapse_identical_duplicates: bool,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("DPUCs - contents + objectives.xlsx"),
            code_column: "CodigoPACO".to_string(),
            url_column: "Url".to_string(),
            collapse_identical_duplicates: false,
        }
    }
}

/// Where the artifacts are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Final artifact; `.xlsx` writes a workbook, `.csv` CSV, anything else Parquet
    pub path: PathBuf,
    /// Directory for per-source intermediate artifacts, if wanted
    pub intermediate_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("UC_all.xlsx"),
            intermediate_dir: None,
        }
    }
}

/// What to do when one discipline code carries different names within a program
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Abort the run
    #[default]
    Fail,
    /// Log every conflict and keep all rows
    Warn,
}

/// Configuration for a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// `<dir>/<department>/<file>` tree of master curricular plans
    pub master_dir: PathBuf,
    /// Flat folder of specialization course plans
    pub specialization_dir: PathBuf,
    /// Microcredential spreadsheet
    pub microcredential_file: PathBuf,
    pub reference: ReferenceConfig,
    pub output: OutputConfig,
    pub columns: SourceColumns,
    /// Leading characters stripped from master file names
    pub master_prefix_len: usize,
    /// Placeholder removed by each loader
    pub free_elective_marker: String,
    /// Placeholder removed again after merge
    pub merge_exclusion_marker: String,
    pub conflict_policy: ConflictPolicy,
    /// Log and skip unreadable or malformed files instead of aborting
    pub skip_unreadable_files: bool,
    /// Load files and sources on the rayon pool
    pub parallel: bool,
    /// Draw progress bars while loading
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            master_dir: PathBuf::from("data/MSC"),
            specialization_dir: PathBuf::from("data/CE"),
            microcredential_file: PathBuf::from("data/Microcredenciais.xlsx"),
            reference: ReferenceConfig::default(),
            output: OutputConfig::default(),
            columns: SourceColumns::default(),
            master_prefix_len: MASTER_PREFIX_LEN,
            free_elective_marker: FREE_ELECTIVE_MARKER.to_string(),
            merge_exclusion_marker: OPTION_MARKER.to_string(),
            conflict_policy: ConflictPolicy::default(),
            skip_unreadable_files: false,
            parallel: true,
            show_progress: false,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CurriculumError::io(path, e))?;
        Self::from_json(&content).map_err(|message| CurriculumError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse a configuration from JSON text
    pub fn from_json(content: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }
}
