//! Discipline resource URLs from the reference table

use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, StringArray};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;

use crate::config::ReferenceConfig;
use crate::error::{CurriculumError, Result};
use crate::reader::read_table;
use crate::schema::{CODE, RESOURCE_URL};
use crate::utils::arrow::{require_string_column, with_column};

/// One resource URL (or none) per discipline code
#[derive(Debug, Clone, Default)]
pub struct ReferenceLinks {
    urls: FxHashMap<String, Option<String>>,
}

impl ReferenceLinks {
    /// Load the reference spreadsheet named by the configuration
    pub fn load(config: &ReferenceConfig) -> Result<Self> {
        let table = read_table(&config.path)?;
        let links = Self::from_table(&table, config, &config.path)?;
        log::info!(
            "Loaded {} resource URLs from {}",
            links.len(),
            config.path.display()
        );
        Ok(links)
    }

    /// Build the lookup from a loaded reference table
    ///
    /// # Errors
    /// Fails with `DuplicateReferenceKey` for the first code listed more than
    /// once, unless identical duplicates may be collapsed and all its URLs agree.
    pub fn from_table(table: &RecordBatch, config: &ReferenceConfig, path: &Path) -> Result<Self> {
        let codes = require_string_column(table, &config.code_column, path)?;
        let urls = require_string_column(table, &config.url_column, path)?;

        let mut map: FxHashMap<String, Option<String>> = FxHashMap::default();
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        let mut first_duplicate: Option<&str> = None;

        for (code, url) in codes.iter().zip(urls.iter()) {
            let Some(code) = code else { continue };
            let url = url.map(str::to_string);

            let count = counts.entry(code).or_default();
            *count += 1;
            if *count == 1 {
                map.insert(code.to_string(), url);
                continue;
            }

            let identical = map.get(code).is_some_and(|existing| *existing == url);
            if !(config.collapse_identical_duplicates && identical) && first_duplicate.is_none() {
                first_duplicate = Some(code);
            }
        }

        if let Some(code) = first_duplicate {
            return Err(CurriculumError::DuplicateReferenceKey {
                code: code.to_string(),
                count: counts[code],
            });
        }
        Ok(Self { urls: map })
    }

    /// Build the lookup directly from pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            urls: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        }
    }

    /// URL for a discipline code
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&str> {
        self.urls.get(code).and_then(|u| u.as_deref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Left-join the URLs onto a table by discipline code
    ///
    /// Returns the joined table and the number of rows that received a URL.
    pub fn attach(&self, batch: &RecordBatch) -> Result<(RecordBatch, usize)> {
        let codes = require_string_column(batch, CODE, Path::new("merged table"))?;
        let urls: StringArray = codes.iter().map(|c| c.and_then(|c| self.get(c))).collect();
        let matched = urls.len() - urls.null_count();

        let joined = with_column(batch, RESOURCE_URL, Arc::new(urls))?;
        Ok((joined, matched))
    }
}
