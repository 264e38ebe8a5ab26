//! Enumeration of source spreadsheets
//!
//! A [`SourceWalk`] describes where a source type keeps its files. Each call to
//! [`SourceWalk::entries`] starts a fresh, lazy pass over the folder in sorted name
//! order, so repeated runs see the files in the same order.

use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::error::util::validate_directory;
use crate::error::{CurriculumError, Result};
use crate::metadata::SourceKind;
use crate::reader::is_spreadsheet;

/// One spreadsheet found by a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetEntry {
    pub path: PathBuf,
    pub kind: SourceKind,
    /// Name of the department folder, for two-level layouts
    pub department: Option<String>,
}

impl SpreadsheetEntry {
    /// File name of the entry
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// Folder layout of one source type
#[derive(Debug, Clone)]
pub struct SourceWalk {
    root: PathBuf,
    kind: SourceKind,
    nested: bool,
}

impl SourceWalk {
    /// `<root>/<department>/<file>` layout of master's programs
    #[must_use]
    pub fn master(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            kind: SourceKind::Master,
            nested: true,
        }
    }

    /// Flat `<root>/<file>` layout of specialization courses
    #[must_use]
    pub fn specialization(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            kind: SourceKind::Specialization,
            nested: false,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Start a pass over the folder
    ///
    /// # Errors
    /// Returns an error if the root is missing or unreadable
    pub fn entries(&self) -> Result<SourceEntries> {
        validate_directory(&self.root)?;

        let (departments, files) = if self.nested {
            let departments = sorted_children(&self.root)?
                .into_iter()
                .filter(|p| p.is_dir() && !is_hidden(p))
                .collect_vec();
            (departments, Vec::new())
        } else {
            (Vec::new(), spreadsheets_in(&self.root)?)
        };

        Ok(SourceEntries {
            kind: self.kind,
            departments: departments.into_iter(),
            department: None,
            files: files.into_iter(),
        })
    }
}

/// Lazy iterator over the spreadsheets of a [`SourceWalk`]
#[derive(Debug)]
pub struct SourceEntries {
    kind: SourceKind,
    departments: std::vec::IntoIter<PathBuf>,
    department: Option<String>,
    files: std::vec::IntoIter<PathBuf>,
}

impl Iterator for SourceEntries {
    type Item = Result<SpreadsheetEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(path) = self.files.next() {
                return Some(Ok(SpreadsheetEntry {
                    path,
                    kind: self.kind,
                    department: self.department.clone(),
                }));
            }

            let dir = self.departments.next()?;
            match spreadsheets_in(&dir) {
                Ok(files) => {
                    self.department = dir.file_name().map(|n| n.to_string_lossy().into_owned());
                    self.files = files.into_iter();
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.') || n.starts_with("~$"))
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut children = std::fs::read_dir(dir)
        .map_err(|e| CurriculumError::io(dir, e))?
        .map(|entry| {
            entry
                .map(|e| e.path())
                .map_err(|e| CurriculumError::io(dir, e))
        })
        .collect::<Result<Vec<_>>>()?;
    children.sort();
    Ok(children)
}

fn spreadsheets_in(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(sorted_children(dir)?
        .into_iter()
        .filter(|p| p.is_file() && !is_hidden(p) && is_spreadsheet(p))
        .collect())
}
