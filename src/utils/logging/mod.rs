//! Logging utilities for output and progress tracking
//!
//! This module provides the pipeline's standard log messages and progress bars
//! for file loading.

pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use self::log::{log_skipped_file, log_table_read, log_table_written};
pub use progress::{file_progress_bar, finish_progress_bar};
