//! Preconstructed deck catalog
//!
//! `DeckList.json` lists every precon deck MTGJSON knows about; the
//! corresponding deck files live in `AllDeckFiles/` after a refresh has
//! rewritten them into collection rows.

use crate::error::{CatalogError, Result};
use crate::models::InventoryRow;
use crate::persistence::load_inventory;
use mtg_common::reference::read_with_freshness;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One entry of the deck list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSummary {
    pub name: String,
    pub code: String,
    pub file_name: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(rename = "type", default)]
    pub deck_type: Option<String>,
}

impl DeckSummary {
    /// Label shown in deck lists: "<name> <set code>"
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.code)
    }

    /// Name of the rewritten deck file
    pub fn file(&self) -> String {
        format!("{}.json", self.file_name)
    }
}

#[derive(Debug, Deserialize)]
struct DeckListFile {
    #[serde(default)]
    data: Vec<DeckSummary>,
}

#[derive(Debug, Clone, Default)]
pub struct DeckCatalog {
    decks: Vec<DeckSummary>,
    freshness: Option<String>,
}

impl DeckCatalog {
    pub fn new(decks: Vec<DeckSummary>) -> Self {
        Self {
            decks,
            freshness: None,
        }
    }

    /// Loads the deck list, failing if it is missing or malformed
    pub fn try_load(path: &Path) -> Result<Self> {
        let (freshness, list) = read_with_freshness::<DeckListFile>(path)?;
        log::info!("Loaded {} decks from {}", list.data.len(), path.display());
        Ok(Self {
            decks: list.data,
            freshness: Some(freshness),
        })
    }

    /// Loads the deck list, or an empty catalog if it cannot be read
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::warn!("Deck list {} unavailable: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn decks(&self) -> &[DeckSummary] {
        &self.decks
    }

    pub fn freshness(&self) -> Option<&str> {
        self.freshness.as_deref()
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// Decks whose label contains `term`, ignoring case. An empty term
    /// matches every deck.
    pub fn search(&self, term: &str) -> Vec<&DeckSummary> {
        let term = term.to_lowercase();
        self.decks
            .iter()
            .filter(|deck| deck.label().to_lowercase().contains(&term))
            .collect()
    }

    /// Finds a deck by its label or its file name
    pub fn find(&self, name: &str) -> Result<&DeckSummary> {
        self.decks
            .iter()
            .find(|deck| deck.label() == name || deck.file_name == name || deck.file() == name)
            .ok_or_else(|| CatalogError::DeckNotFound(name.to_string()))
    }
}

/// Path of a deck's rewritten file inside the deck directory
pub fn deck_path(deck_dir: &Path, deck: &DeckSummary) -> PathBuf {
    deck_dir.join(deck.file())
}

/// Reads the rows of a rewritten deck file
pub fn load_deck_rows(path: &Path) -> Result<Vec<InventoryRow>> {
    load_inventory(path)
}
