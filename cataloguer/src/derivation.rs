//! Derived fields of a collection row
//!
//! Storage quantity and total prices are pure functions of other cells, and
//! the card display fields come from the reference index. Cells transiently
//! hold blank or partial text while the user types, so every numeric parse
//! falls back to zero instead of failing.

use crate::models::InventoryRow;
use lazy_static::lazy_static;
use mtg_common::{CardRecord, ReferenceIndex, FACE_SEPARATOR};
use regex::Regex;

lazy_static! {
    static ref NON_PRICE_CHARS: Regex = Regex::new(r"[^0-9.]").unwrap();
}

/// Parse a quantity cell, returning 0 if parsing fails
pub fn parse_quantity(value: &str) -> i64 {
    value.trim().parse::<i64>().unwrap_or(0)
}

/// Parse a price cell such as "$1.50", returning 0.0 if parsing fails.
///
/// Everything except digits and dots is stripped first, so currency symbols
/// and signs are ignored.
pub fn parse_price(value: &str) -> f64 {
    NON_PRICE_CHARS
        .replace_all(value, "")
        .parse::<f64>()
        .unwrap_or(0.0)
}

/// Copies not allocated to any deck. Negative when decks claim more copies
/// than the row holds; that is reported as-is. Results beyond the `i64`
/// range saturate.
pub fn compute_storage_quantity(quantity: &str, deck_quantities: [&str; 4]) -> i64 {
    let allocated = deck_quantities
        .iter()
        .map(|q| parse_quantity(q))
        .fold(0i64, i64::saturating_add);
    parse_quantity(quantity).saturating_sub(allocated)
}

/// Total values of a row's non-foil and foil copies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub usd: f64,
    pub usd_foil: f64,
}

impl Totals {
    /// Cell text for both totals, see [`format_total`]
    pub fn render(&self) -> (String, String) {
        (format_total(self.usd), format_total(self.usd_foil))
    }
}

/// `quantity` counts all copies including foils, so the non-foil total uses
/// `quantity - quantity_foil`.
pub fn compute_totals(quantity: &str, quantity_foil: &str, usd: &str, usd_foil: &str) -> Totals {
    let quantity = parse_quantity(quantity);
    let quantity_foil = parse_quantity(quantity_foil);
    Totals {
        usd: quantity.saturating_sub(quantity_foil) as f64 * parse_price(usd),
        usd_foil: quantity_foil as f64 * parse_price(usd_foil),
    }
}

/// Formats a total with two decimals. A total that renders as zero cents
/// (`0.00` or `-0.00`) is shown as an empty cell.
pub fn format_total(value: f64) -> String {
    let text = format!("{:.2}", value);
    if text.parse::<f64>().map(|v| v == 0.0).unwrap_or(true) {
        String::new()
    } else {
        text
    }
}

fn dedup_faces(joined: &str) -> Vec<&str> {
    let mut faces: Vec<&str> = Vec::new();
    for face in joined.split(FACE_SEPARATOR) {
        if !faces.contains(&face) {
            faces.push(face);
        }
    }
    faces
}

fn pad_with_first<'a>(faces: &mut Vec<&'a str>, len: usize) {
    if let Some(&first) = faces.first() {
        while faces.len() < len {
            faces.push(first);
        }
    }
}

/// Finds the reference record for a row identity.
///
/// Multi-face identities (`"neo // neo"`, `"12 // 12b"`) are split into faces,
/// deduplicated, and the shorter list is padded with its first face; the
/// first (set, number) pair present in the index wins.
pub fn resolve_card_lookup<'a>(
    language: &str,
    set_code: &str,
    collector_number: &str,
    index: &'a ReferenceIndex,
) -> Option<&'a CardRecord> {
    if !set_code.contains(FACE_SEPARATOR) && !collector_number.contains(FACE_SEPARATOR) {
        return index.lookup(language, set_code, collector_number);
    }

    let mut sets = dedup_faces(set_code);
    let mut numbers = dedup_faces(collector_number);
    pad_with_first(&mut sets, numbers.len());
    pad_with_first(&mut numbers, sets.len());

    sets.iter()
        .zip(numbers.iter())
        .find_map(|(set, number)| index.lookup(language, set, number))
}

/// Recomputes `storage_quantity` from quantity and deck quantities
pub fn update_storage_quantity(row: &mut InventoryRow) {
    let storage = compute_storage_quantity(&row.quantity, row.deck_quantities());
    row.storage_quantity = storage.to_string();
}

/// Recomputes `total_usd` and `total_usd_foil`
pub fn update_totals(row: &mut InventoryRow) {
    let (total, total_foil) =
        compute_totals(&row.quantity, &row.quantity_foil, &row.usd, &row.usd_foil).render();
    row.total_usd = total;
    row.total_usd_foil = total_foil;
}

/// Copies the reference display fields and prices onto a row
pub fn apply_card_record(row: &mut InventoryRow, card: &CardRecord) {
    row.name = card.name.clone();
    row.type_line = card.type_line.clone();
    row.release_date = card.release_date.clone();
    row.set_name = card.set_name.clone();
    row.color_identity = card.color_identity_joined();
    row.usd = card.usd.clone().unwrap_or_default();
    row.usd_foil = card.usd_foil.clone().unwrap_or_default();
}

/// Refreshes display fields from the reference index. Returns false and leaves
/// the row untouched when the identity has no reference record.
pub fn update_card_fields(row: &mut InventoryRow, index: &ReferenceIndex) -> bool {
    match resolve_card_lookup(&row.language, &row.set_code, &row.collector_number, index) {
        Some(card) => {
            apply_card_record(row, card);
            true
        }
        None => {
            log::debug!("No reference card for {}", row.key());
            false
        }
    }
}

#[cfg(test)]
#[path = "derivation_tests.rs"]
mod tests;
