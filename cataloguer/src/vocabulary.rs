//! Controlled vocabularies checked when identity cells are edited

use crate::columns::Column;
use crate::error::{CatalogError, Result};
use mtg_common::reference::read_set_codes;
use mtg_common::Language;
use std::collections::HashSet;
use std::path::Path;

/// Known set codes. Language codes are fixed and come from [`Language`].
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    set_codes: HashSet<String>,
}

impl Vocabulary {
    pub fn new<I, S>(set_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            set_codes: set_codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Loads set codes from `sets.json`. A missing or unreadable file gives an
    /// empty vocabulary, which accepts every set code.
    pub fn load(sets_path: &Path) -> Self {
        match read_set_codes(sets_path) {
            Ok(codes) => {
                log::info!("Loaded {} set codes from {}", codes.len(), sets_path.display());
                Self::new(codes)
            }
            Err(e) => {
                log::warn!(
                    "Set list {} unavailable, set codes will not be checked: {}",
                    sets_path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn set_count(&self) -> usize {
        self.set_codes.len()
    }

    pub fn is_valid_set(&self, code: &str) -> bool {
        self.set_codes.is_empty() || self.set_codes.contains(code)
    }

    pub fn is_valid_language(&self, code: &str) -> bool {
        Language::from_code(code).is_some()
    }

    /// Rejects a new cell value that is outside the vocabulary of its column.
    /// Clearing a cell is always allowed.
    pub fn validate(&self, column: Column, value: &str) -> Result<()> {
        if value.is_empty() {
            return Ok(());
        }
        match column {
            Column::Set if !self.is_valid_set(value) => {
                Err(CatalogError::InvalidSetCode(value.to_string()))
            }
            Column::Language if !self.is_valid_language(value) => {
                Err(CatalogError::InvalidLanguage(value.to_string()))
            }
            _ => Ok(()),
        }
    }
}
