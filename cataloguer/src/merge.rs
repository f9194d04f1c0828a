//! Folding decklist rows into a collection

use crate::derivation::{parse_quantity, update_card_fields, update_storage_quantity, update_totals};
use crate::error::Result;
use crate::models::InventoryRow;
use crate::ordering::sort_rows;
use mtg_common::{CardKey, ReferenceIndex};
use std::collections::HashMap;

/// Counts of what a merge did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Incoming rows added onto an existing row
    pub merged: usize,
    /// Incoming rows appended as new rows
    pub appended: usize,
}

fn add_counts(existing: &str, incoming: &str) -> String {
    parse_quantity(existing)
        .saturating_add(parse_quantity(incoming))
        .to_string()
}

fn has_foils(quantity_foil: &str) -> bool {
    !quantity_foil.trim().is_empty() && parse_quantity(quantity_foil) != 0
}

fn fold_into(target: &mut InventoryRow, incoming: &InventoryRow) {
    target.quantity = add_counts(&target.quantity, &incoming.quantity);
    target.storage_quantity = add_counts(&target.storage_quantity, &incoming.storage_quantity);
    if has_foils(&incoming.quantity_foil) {
        target.quantity_foil = add_counts(&target.quantity_foil, &incoming.quantity_foil);
    }
    update_totals(target);
}

/// Merges `incoming` into `inventory` and sorts the result canonically.
///
/// An incoming row whose identity triple already exists (including rows
/// appended earlier in the same merge) is added onto that row: quantity and
/// storage quantity are summed, and the foil count is summed only when the
/// incoming foil count is present and non-zero. Other rows are appended as-is.
/// If the final sort fails the merged rows are kept in merge order.
pub fn merge_rows(
    inventory: &mut Vec<InventoryRow>,
    incoming: impl IntoIterator<Item = InventoryRow>,
) -> Result<MergeReport> {
    let mut positions: HashMap<CardKey, usize> = HashMap::new();
    for (index, row) in inventory.iter().enumerate() {
        positions.entry(row.key()).or_insert(index);
    }

    let mut report = MergeReport::default();
    for row in incoming {
        let key = row.key();
        match positions.get(&key) {
            Some(&index) => {
                fold_into(&mut inventory[index], &row);
                report.merged += 1;
            }
            None => {
                positions.insert(key, inventory.len());
                inventory.push(row);
                report.appended += 1;
            }
        }
    }

    log::info!(
        "Merged {} rows into existing entries, appended {} new rows",
        report.merged,
        report.appended
    );
    sort_rows(inventory)?;
    Ok(report)
}

/// Fills derived and reference fields of a freshly rewritten deck row
pub fn normalize_deck_row(row: &mut InventoryRow, index: &ReferenceIndex) {
    update_card_fields(row, index);
    update_storage_quantity(row);
    update_totals(row);
}

/// Normalizes deck rows against the reference index, then merges them into
/// the collection.
pub fn import_decklist(
    inventory: &mut Vec<InventoryRow>,
    mut deck: Vec<InventoryRow>,
    index: &ReferenceIndex,
) -> Result<MergeReport> {
    for row in deck.iter_mut() {
        normalize_deck_row(row, index);
    }
    merge_rows(inventory, deck)
}
