//! MTGJSON deck list and deck archive

use super::{download_to, get, ingest, needs_update, RefreshConfig};
use crate::error::Result;
use reqwest::header::LAST_MODIFIED;
use std::path::Path;

/// The `Last-Modified` header, or an empty string when absent
pub fn last_modified(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(LAST_MODIFIED)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Joins a freshness line and a downloaded body
pub fn with_freshness_line(freshness: &str, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(freshness.len() + 1 + body.len());
    out.extend_from_slice(freshness.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(body);
    out
}

/// Rewrites `DeckList.json` when MTGJSON serves a newer copy
pub async fn refresh_deck_list(client: reqwest::Client, config: RefreshConfig) -> Result<bool> {
    let url = format!("{}/DeckList.json", config.mtgjson_base);
    let response = get(&client, &url).await?;
    let stamp = last_modified(&response);

    let path = config.deck_list_path();
    if !needs_update(&path, &stamp, config.force) {
        return Ok(false);
    }
    let body = response.bytes().await?;
    tokio::fs::write(&path, with_freshness_line(&stamp, &body)).await?;
    log::info!("Wrote deck list to {}", path.display());
    Ok(true)
}

/// Downloads and installs `AllDeckFiles.zip` when MTGJSON serves a newer
/// copy. The freshness line goes to `AllDeckFiles.meta` once the archive
/// has been extracted.
pub async fn refresh_deck_files(client: reqwest::Client, config: RefreshConfig) -> Result<bool> {
    let url = format!("{}/AllDeckFiles.zip", config.mtgjson_base);
    let response = get(&client, &url).await?;
    let stamp = last_modified(&response);

    let meta = config.deck_files_meta_path();
    if !needs_update(&meta, &stamp, config.force) {
        return Ok(false);
    }

    let archive = config.data_dir.join("AllDeckFiles.zip");
    download_to(response, &archive).await?;

    let dest = config.deck_files_dir();
    let installed =
        tokio::task::spawn_blocking(move || ingest::install_deck_archive(&archive, &dest))
            .await??;

    write_meta(&meta, &stamp).await?;
    log::info!("Installed {} deck files", installed);
    Ok(true)
}

async fn write_meta(path: &Path, stamp: &str) -> Result<()> {
    tokio::fs::write(path, format!("{}\n", stamp)).await?;
    Ok(())
}
