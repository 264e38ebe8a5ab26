//! A Rust library for normalizing curricular-plan spreadsheets from several
//! program types into one discipline table, enriched with resource URLs.

pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod merge;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{ConflictPolicy, PipelineConfig};
pub use error::{CurriculumError, Result};
pub use metadata::{FilenameError, SourceKind};
pub use schema::{CANONICAL_COLUMNS, CanonicalRecord};

// Arrow types
pub use arrow::record_batch::RecordBatch;

// Loading and merging
pub use loader::{MasterLoader, MicrocredentialLoader, SourceLoader, SpecializationLoader};
pub use merge::{MergeOptions, MergeReport, ReferenceLinks, merge_sources};
pub use pipeline::{BuiltTable, PipelineSummary, build_table, run};
