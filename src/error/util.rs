//! Utility functions for error handling
//!
//! This module provides path checks that fail with rich error information
//! before any reader is opened.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{CurriculumError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
///
/// # Returns
/// * `Result<fs::File>` - The opened file or a detailed error
pub fn safe_open_file(path: &Path) -> Result<fs::File> {
    validate_file(path)?;
    fs::File::open(path).map_err(|e| CurriculumError::io(path, e))
}

/// Check that a path exists and is a regular file
pub fn validate_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CurriculumError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, "File not found"),
        ));
    }

    if !path.is_file() {
        return Err(CurriculumError::NotAFile(path.to_path_buf()));
    }

    Ok(())
}

/// Check if a directory exists and is readable, with rich error information
pub fn validate_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CurriculumError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, "Directory not found"),
        ));
    }

    if !path.is_dir() {
        return Err(CurriculumError::NotADirectory(path.to_path_buf()));
    }

    // Try to read the directory to check permissions
    fs::read_dir(path)
        .map(|_| ())
        .map_err(|e| CurriculumError::io(path, e))
}
