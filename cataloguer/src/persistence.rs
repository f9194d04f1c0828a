//! Reading and writing collection files
//!
//! A collection file is a JSON array of rows. Saves always overwrite the
//! whole file.

use crate::error::Result;
use crate::merge::{import_decklist, MergeReport};
use crate::models::InventoryRow;
use mtg_common::ReferenceIndex;
use crate::ordering::sort_rows;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Reads a collection file
pub fn load_inventory(path: &Path) -> Result<Vec<InventoryRow>> {
    let reader = BufReader::new(File::open(path)?);
    let rows: Vec<InventoryRow> = serde_json::from_reader(reader)?;
    log::info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Reads a collection file, returning an empty table if it is missing or
/// malformed
pub fn load_inventory_or_empty(path: &Path) -> Vec<InventoryRow> {
    match load_inventory(path) {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("Could not load {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Writes rows as they are
pub fn write_inventory(path: &Path, rows: &[InventoryRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}

/// Sorts rows canonically and overwrites the file with them. Nothing is
/// written if the sort fails.
pub fn save_inventory(path: &Path, rows: &mut Vec<InventoryRow>) -> Result<()> {
    sort_rows(rows)?;
    write_inventory(path, rows)?;
    log::info!("Saved {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Merges deck rows into a collection file. The file is only rewritten when
/// the merge and its sort succeed.
pub fn import_deck_file(
    path: &Path,
    deck: Vec<InventoryRow>,
    index: &ReferenceIndex,
) -> Result<MergeReport> {
    let mut rows = load_inventory(path)?;
    let report = import_decklist(&mut rows, deck, index)?;
    write_inventory(path, &rows)?;
    log::info!("Imported deck into {}", path.display());
    Ok(report)
}

/// Creates a collection file with no rows
pub fn create_empty_inventory(path: &Path) -> Result<()> {
    write_inventory(path, &[])?;
    log::info!("Created empty collection file {}", path.display());
    Ok(())
}
