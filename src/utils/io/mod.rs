//! IO utilities for file operations
//!
//! This module provides source folder enumeration and artifact writing.

pub mod walk;
pub mod writer;

// Re-export commonly used functions for convenience
pub use walk::{SourceEntries, SourceWalk, SpreadsheetEntry};
pub use writer::{OutputFormat, write_table};
