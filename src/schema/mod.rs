//! The canonical discipline schema shared by every source type.

use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod normalize;

pub use normalize::{Normalization, normalize};

/// Discipline code, the join key
pub const CODE: &str = "CODDISCIPLINACOD";
/// Discipline name
pub const NAME: &str = "NOMEDISCIPLINA";
/// Owning department
pub const DEPARTMENT: &str = "DEPARTMENT";
/// `code_name` of a master's program
pub const MASTER: &str = "MSC";
/// Branch or pathway within a master's program
pub const TRACK: &str = "RAMO";
/// `code_name` of a specialization course
pub const SPECIALIZATION: &str = "CE";
/// `code_title` of a microcredential
pub const MICROCREDENTIAL: &str = "Microcredencial";
/// Resource URL joined from the reference table
pub const RESOURCE_URL: &str = "Url";

/// Column order of the final artifact
pub const CANONICAL_COLUMNS: [&str; 8] = [
    CODE,
    NAME,
    DEPARTMENT,
    MASTER,
    TRACK,
    SPECIALIZATION,
    MICROCREDENTIAL,
    RESOURCE_URL,
];

/// Columns identifying which program a row belongs to
pub const PROGRAM_COLUMNS: [&str; 4] = [MASTER, TRACK, SPECIALIZATION, MICROCREDENTIAL];

/// One row of the final discipline table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalRecord {
    #[serde(rename = "CODDISCIPLINACOD")]
    pub discipline_code: String,
    #[serde(rename = "NOMEDISCIPLINA")]
    pub discipline_name: Option<String>,
    #[serde(rename = "DEPARTMENT")]
    pub department: Option<String>,
    #[serde(rename = "MSC")]
    pub program_master: Option<String>,
    #[serde(rename = "RAMO")]
    pub track: Option<String>,
    #[serde(rename = "CE")]
    pub program_specialization: Option<String>,
    #[serde(rename = "Microcredencial")]
    pub microcredential: Option<String>,
    #[serde(rename = "Url")]
    pub resource_url: Option<String>,
}

impl CanonicalRecord {
    /// Deserialize the rows of a canonical table
    pub fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        Ok(serde_arrow::from_record_batch(batch)?)
    }

    /// Program columns as one comparable key
    #[must_use]
    pub fn program_key(&self) -> [Option<&str>; 4] {
        [
            self.program_master.as_deref(),
            self.track.as_deref(),
            self.program_specialization.as_deref(),
            self.microcredential.as_deref(),
        ]
    }
}
