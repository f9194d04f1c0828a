//! Scryfall set list and bulk card data

use super::{download_to, get, ingest, needs_update, RefreshConfig};
use crate::error::{CatalogError, Result};
use mtg_common::reference::write_with_freshness;
use serde::Deserialize;

/// Set entry from `GET /sets`
#[derive(Debug, Clone, Deserialize)]
pub struct ScryfallSet {
    pub code: String,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default)]
    pub digital: bool,
}

#[derive(Debug, Deserialize)]
struct SetList {
    data: Vec<ScryfallSet>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_page: Option<String>,
}

/// Entry from `GET /bulk-data`
#[derive(Debug, Clone, Deserialize)]
pub struct BulkDataEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub download_uri: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
struct BulkDataList {
    data: Vec<BulkDataEntry>,
}

/// Bulk-data type holding every printing in every language
pub const ALL_CARDS: &str = "all_cards";

/// Codes of the non-digital sets and the most recent non-digital release
/// date, which serves as the freshness token of the set list.
pub fn paper_sets(sets: &[ScryfallSet]) -> (String, Vec<String>) {
    let paper: Vec<&ScryfallSet> = sets.iter().filter(|s| !s.digital).collect();
    let latest = paper
        .iter()
        .filter_map(|s| s.released_at.as_deref())
        .max()
        .unwrap_or_default()
        .to_string();
    let codes = paper.iter().map(|s| s.code.clone()).collect();
    (latest, codes)
}

/// Fetches every page of the set list
pub async fn fetch_sets(client: &reqwest::Client, base: &str) -> Result<Vec<ScryfallSet>> {
    let mut url = format!("{}/sets", base);
    let mut sets = Vec::new();
    loop {
        let page: SetList = get(client, &url).await?.json().await?;
        sets.extend(page.data);
        match page.next_page {
            Some(next) if page.has_more => url = next,
            _ => break,
        }
    }
    log::info!("Fetched {} sets from Scryfall", sets.len());
    Ok(sets)
}

/// Rewrites `sets.json` when a newer paper set has been released
pub async fn refresh_sets(client: reqwest::Client, config: RefreshConfig) -> Result<bool> {
    let sets = fetch_sets(&client, &config.scryfall_base).await?;
    let (latest, codes) = paper_sets(&sets);

    let path = config.sets_path();
    if !needs_update(&path, &latest, config.force) {
        return Ok(false);
    }
    write_with_freshness(&path, &latest, &codes)?;
    log::info!("Wrote {} set codes to {}", codes.len(), path.display());
    Ok(true)
}

/// Looks up one entry of the bulk-data listing
pub async fn fetch_bulk_entry(
    client: &reqwest::Client,
    base: &str,
    kind: &str,
) -> Result<BulkDataEntry> {
    let list: BulkDataList = get(client, &format!("{}/bulk-data", base))
        .await?
        .json()
        .await?;
    list.data
        .into_iter()
        .find(|entry| entry.kind == kind)
        .ok_or_else(|| CatalogError::BulkDataMissing(kind.to_string()))
}

/// Downloads the `all_cards` bulk file and rewrites it into `all_cards.json`
/// when Scryfall reports a newer build.
pub async fn refresh_all_cards(client: reqwest::Client, config: RefreshConfig) -> Result<bool> {
    let entry = fetch_bulk_entry(&client, &config.scryfall_base, ALL_CARDS).await?;

    let dest = config.all_cards_path();
    if !needs_update(&dest, &entry.updated_at, config.force) {
        return Ok(false);
    }

    log::info!("Downloading bulk card data from {}", entry.download_uri);
    let download = config.data_dir.join("all_cards.download");
    let partial = config.data_dir.join("all_cards.json.part");
    let response = get(&client, &entry.download_uri).await?;
    download_to(response, &download).await?;

    let (source, target, freshness) = (download.clone(), partial.clone(), entry.updated_at);
    let rewritten =
        tokio::task::spawn_blocking(move || ingest::rewrite_bulk_file(&source, &target, &freshness))
            .await?;

    if let Err(e) = tokio::fs::remove_file(&download).await {
        log::warn!("Could not remove {}: {}", download.display(), e);
    }
    rewritten?;
    tokio::fs::rename(&partial, &dest).await?;
    Ok(true)
}
