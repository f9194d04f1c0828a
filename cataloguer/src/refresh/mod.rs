//! Background refresh of the reference data
//!
//! Four downloads run in parallel: the Scryfall set list, the Scryfall bulk
//! card data, the MTGJSON deck list and the MTGJSON deck archive. Each one
//! compares the remote timestamp with the freshness line of its local file
//! and skips the download when they match. A failed download is logged and
//! reported as "not updated"; it never stops the others.

pub mod ingest;
pub mod mtgjson;
pub mod scryfall;

use crate::config::{Settings, ALL_CARDS_FILE, DECK_FILES_DIR, DECK_LIST_FILE, SETS_FILE};
use crate::error::{CatalogError, Result};
use mtg_common::reference::read_freshness;
use mtg_common::SharedReferenceIndex;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

pub const SCRYFALL_API: &str = "https://api.scryfall.com";
pub const MTGJSON_API: &str = "https://mtgjson.com/api/v5";
const USER_AGENT: &str = "cataloguer/0.1";

/// Where to download from and where to put the results
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub data_dir: PathBuf,
    pub scryfall_base: String,
    pub mtgjson_base: String,
    /// Download even when the local freshness line matches
    pub force: bool,
}

impl RefreshConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            scryfall_base: SCRYFALL_API.to_string(),
            mtgjson_base: MTGJSON_API.to_string(),
            force: false,
        }
    }

    /// Uses the settings' data directory; the first refresh always downloads
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            force: settings.first_startup,
            ..Self::new(&settings.data_dir)
        }
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

    /// Freshness file of the deck archive, which itself is removed once
    /// extracted
    pub fn deck_files_meta_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.meta", DECK_FILES_DIR))
    }
}

/// Which reference files were rewritten
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub sets: bool,
    pub all_cards: bool,
    pub deck_list: bool,
    pub deck_files: bool,
}

impl RefreshReport {
    pub fn any(&self) -> bool {
        self.sets || self.all_cards || self.deck_list || self.deck_files
    }
}

/// True when the local file should be replaced: forced, missing, or its
/// freshness line differs from `remote`.
pub fn needs_update(path: &Path, remote: &str, force: bool) -> bool {
    if force {
        return true;
    }
    match read_freshness(path) {
        Ok(stored) => stored != remote,
        Err(_) => true,
    }
}

pub(crate) fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
}

/// Sends a GET request, turning non-success statuses into errors
pub(crate) async fn get(client: &reqwest::Client, url: &str) -> Result<reqwest::Response> {
    log::debug!("GET {}", url);
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(CatalogError::HttpStatus(response.status()));
    }
    Ok(response)
}

/// Streams a response body into `path`, returning the number of bytes
pub(crate) async fn download_to(mut response: reqwest::Response, path: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    log::debug!("Downloaded {} bytes to {}", written, path.display());
    Ok(written)
}

fn joined(result: std::result::Result<Result<bool>, tokio::task::JoinError>) -> Result<bool> {
    result?
}

fn task_outcome(task: &str, result: Result<bool>) -> bool {
    match result {
        Ok(true) => {
            log::info!("{} updated", task);
            true
        }
        Ok(false) => {
            log::info!("{} already up to date", task);
            false
        }
        Err(e) => {
            log::warn!("{} not updated: {}", task, e);
            false
        }
    }
}

/// Runs the four downloads in parallel and waits for all of them
pub async fn refresh_all(config: &RefreshConfig) -> Result<RefreshReport> {
    std::fs::create_dir_all(&config.data_dir)?;
    let client = http_client()?;

    let sets = tokio::spawn(scryfall::refresh_sets(client.clone(), config.clone()));
    let cards = tokio::spawn(scryfall::refresh_all_cards(client.clone(), config.clone()));
    let deck_list = tokio::spawn(mtgjson::refresh_deck_list(client.clone(), config.clone()));
    let deck_files = tokio::spawn(mtgjson::refresh_deck_files(client, config.clone()));

    let (sets, cards, deck_list, deck_files) = tokio::join!(sets, cards, deck_list, deck_files);

    Ok(RefreshReport {
        sets: task_outcome("Set list", joined(sets)),
        all_cards: task_outcome("Card data", joined(cards)),
        deck_list: task_outcome("Deck list", joined(deck_list)),
        deck_files: task_outcome("Deck files", joined(deck_files)),
    })
}

/// Refreshes, then swaps in a new reference index if the card data changed
pub async fn refresh_and_reload(
    config: &RefreshConfig,
    index: &SharedReferenceIndex,
) -> Result<RefreshReport> {
    let report = refresh_all(config).await?;
    if report.all_cards {
        let count = index.reload(&config.all_cards_path());
        log::info!("Reference index reloaded with {} cards", count);
    }
    Ok(report)
}
