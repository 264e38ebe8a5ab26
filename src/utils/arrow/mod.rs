//! Arrow data handling utilities
//!
//! This module contains utilities for working with string-typed Arrow arrays
//! and record batches addressed by column name.

pub mod array_utils;
pub mod table;

// Re-export commonly used functions for convenience
pub use array_utils::{
    blank_rows, constant_column, map_strings, require_string_column, string_column,
};
pub use table::{
    column_names, concat_aligned, dedup_rows, drop_column, filter_rows, move_to_front,
    rename_column, select_columns, string_schema, table_from_rows, with_column,
};
