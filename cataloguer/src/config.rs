//! Persisted user settings
//!
//! Stored as JSON under the user's config directory. Reference data
//! downloaded by the refresh lives under `data_dir`.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Collection tabs and their default file locations
pub const DEFAULT_COLLECTIONS: [(&str, &str); 9] = [
    ("Art", "./JSONs/A.json"),
    ("Black", "./JSONs/B.json"),
    ("Colorless", "./JSONs/C.json"),
    ("Green", "./JSONs/G.json"),
    ("Multicolored", "./JSONs/M.json"),
    ("Red", "./JSONs/R.json"),
    ("Tokens", "./JSONs/T.json"),
    ("Blue", "./JSONs/U.json"),
    ("White", "./JSONs/W.json"),
];

pub const SETS_FILE: &str = "sets.json";
pub const ALL_CARDS_FILE: &str = "all_cards.json";
pub const DECK_LIST_FILE: &str = "DeckList.json";
pub const DECK_FILES_DIR: &str = "AllDeckFiles";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the downloaded reference files
    pub data_dir: PathBuf,
    /// Collection name to collection file
    pub collections: BTreeMap<String, PathBuf>,
    /// Kept for UI front ends
    pub dark_mode: bool,
    /// No refresh has completed yet; the first one always downloads
    pub first_startup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            collections: DEFAULT_COLLECTIONS
                .iter()
                .map(|(label, path)| (label.to_string(), PathBuf::from(path)))
                .collect(),
            dark_mode: false,
            first_startup: true,
        }
    }
}

/// Returns the default data directory: ~/.local/share/cataloguer
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cataloguer")
}

impl Settings {
    /// Get the default settings file path
    pub fn settings_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cataloguer")
            .join("settings.json")
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    /// Load settings from disk, or defaults if missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(settings) => {
                        log::debug!("Loaded settings from {}", path.display());
                        return settings;
                    }
                    Err(e) => {
                        log::warn!("Failed to parse settings file, using defaults: {}", e);
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read settings file, using defaults: {}", e);
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Restores default collection paths and theme. The data directory and
    /// first-startup flag are kept.
    pub fn reset_to_default(&mut self) {
        let defaults = Self::default();
        self.collections = defaults.collections;
        self.dark_mode = defaults.dark_mode;
    }

    pub fn collection_path(&self, name: &str) -> Option<&Path> {
        self.collections.get(name).map(PathBuf::as_path)
    }

    pub fn set_collection_path(&mut self, name: &str, path: impl Into<PathBuf>) {
        self.collections.insert(name.to_string(), path.into());
    }

    /// Treats `name_or_path` as a collection name first, then as a file path
    pub fn resolve_collection(&self, name_or_path: &str) -> PathBuf {
        self.collections
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(name_or_path))
            .map(|(_, path)| path.clone())
            .unwrap_or_else(|| PathBuf::from(name_or_path))
    }

    pub fn sets_path(&self) -> PathBuf {
        self.data_dir.join(SETS_FILE)
    }

    pub fn all_cards_path(&self) -> PathBuf {
        self.data_dir.join(ALL_CARDS_FILE)
    }

    pub fn deck_list_path(&self) -> PathBuf {
        self.data_dir.join(DECK_LIST_FILE)
    }

    pub fn deck_files_dir(&self) -> PathBuf {
        self.data_dir.join(DECK_FILES_DIR)
    }
}
