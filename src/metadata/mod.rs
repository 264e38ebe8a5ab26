//! Structural metadata encoded in spreadsheet folder and file names
//!
//! Master-program files carry the program label (and optionally a branch or
//! pathway) after a fixed-length prefix. Specialization files list their
//! departments followed by a two-token program identifier.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Default number of leading characters stripped from master-program file names
pub const MASTER_PREFIX_LEN: usize = 11;

/// Token marking a branch section in a master-program label
pub const BRANCH_TOKEN: &str = "Ramo";

/// Token marking a pathway section in a master-program label
pub const PATHWAY_TOKEN: &str = "Percurso";

/// The three kinds of curricular source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Master's degree curricular plans
    Master,
    /// Specialization / continuing-education courses
    Specialization,
    /// Microcredentials
    Microcredential,
}

impl SourceKind {
    /// Short label used in logs and intermediate artifact names
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Master => "MSC",
            Self::Specialization => "CE",
            Self::Microcredential => "Microcredential",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reasons a file name fails its naming convention
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilenameError {
    /// File stem is not longer than the fixed prefix
    #[error("name has {len} characters, expected more than the {prefix_len}-character prefix")]
    TooShort { len: usize, prefix_len: usize },

    /// Nothing remains for the program label
    #[error("program label is empty")]
    EmptyProgram,

    /// A branch or pathway marker is not followed by a name
    #[error("'{marker}' section has no name")]
    EmptyTrack { marker: &'static str },

    /// Too few underscore-delimited tokens
    #[error("found {found} underscore-delimited tokens, expected at least 3")]
    TooFewTokens { found: usize },

    /// An underscore-delimited token is empty
    #[error("token {position} is empty")]
    EmptyToken { position: usize },
}

/// Metadata extracted from a master-program file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterFileMeta {
    pub department: String,
    pub program: String,
    pub track: Option<String>,
}

/// Metadata extracted from a specialization file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecializationFileMeta {
    /// Departments sharing the course, in file-name order
    pub departments: SmallVec<[String; 4]>,
    /// `<code>_<name>` of the course
    pub program: String,
}

/// File name without its extension
#[must_use]
pub fn file_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
}

/// Parse a master-program file name
///
/// # Arguments
/// * `department` - Name of the department folder holding the file
/// * `file_name` - File name including extension
/// * `prefix_len` - Number of leading characters to strip
pub fn parse_master_filename(
    department: &str,
    file_name: &str,
    prefix_len: usize,
) -> Result<MasterFileMeta, FilenameError> {
    let stem = file_stem(file_name);
    let label = match stem.char_indices().nth(prefix_len) {
        Some((idx, _)) => &stem[idx..],
        None => {
            return Err(FilenameError::TooShort {
                len: stem.chars().count(),
                prefix_len,
            });
        }
    };

    let (program, track) = split_track(label)?;
    if program.is_empty() {
        return Err(FilenameError::EmptyProgram);
    }

    Ok(MasterFileMeta {
        department: department.to_string(),
        program: program.to_string(),
        track,
    })
}

/// Split a program label on its branch or pathway marker
///
/// Branch takes precedence over pathway. The program is the text before the first
/// marker occurrence and the track the text after the last one.
fn split_track(label: &str) -> Result<(&str, Option<String>), FilenameError> {
    for marker in [BRANCH_TOKEN, PATHWAY_TOKEN] {
        let Some((before, _)) = label.split_once(marker) else {
            continue;
        };
        let after = label.rsplit_once(marker).map_or("", |(_, a)| a);

        let program = before.trim().trim_end_matches('_');
        let track = after.trim().trim_start_matches('_');
        if track.is_empty() {
            return Err(FilenameError::EmptyTrack { marker });
        }

        let track = if marker == PATHWAY_TOKEN {
            format!("{PATHWAY_TOKEN}_{track}")
        } else {
            track.to_string()
        };
        return Ok((program, Some(track)));
    }

    Ok((label.trim(), None))
}

/// Parse a specialization file name of the form `<dept1>_..._<deptN>_<code>_<name>`
pub fn parse_specialization_filename(
    file_name: &str,
) -> Result<SpecializationFileMeta, FilenameError> {
    let tokens: Vec<&str> = file_stem(file_name).split('_').collect();
    if tokens.len() < 3 {
        return Err(FilenameError::TooFewTokens {
            found: tokens.len(),
        });
    }
    if let Some(position) = tokens.iter().position(|t| t.trim().is_empty()) {
        return Err(FilenameError::EmptyToken {
            position: position + 1,
        });
    }

    let split = tokens.len() - 2;
    let mut departments: SmallVec<[String; 4]> = SmallVec::new();
    for token in &tokens[..split] {
        let token = token.trim();
        if !departments.iter().any(|d| d == token) {
            departments.push(token.to_string());
        }
    }

    Ok(SpecializationFileMeta {
        departments,
        program: tokens[split..].join("_"),
    })
}
