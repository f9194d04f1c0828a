//! Detection of rows sharing an identity triple

use crate::models::InventoryRow;
use mtg_common::CardKey;
use std::str::FromStr;

/// Another row already carries the identity an edit would produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateFound {
    /// Row being edited
    pub row: usize,
    /// First other row with the same triple
    pub existing: usize,
    pub key: CardKey,
}

/// What to do when an identity edit collides with an existing row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateDecision {
    /// Leave the edit uncommitted and point the user at the existing row
    Redirect,
    /// Commit anyway; both rows remain
    KeepBoth,
    #[default]
    Cancel,
}

impl FromStr for DuplicateDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redirect" => Ok(Self::Redirect),
            "keep-both" | "keep_both" | "keep" => Ok(Self::KeepBoth),
            "cancel" => Ok(Self::Cancel),
            other => Err(format!("unknown duplicate decision: {other}")),
        }
    }
}

/// Returns the first row other than `exclude_row` whose triple equals the
/// given one exactly.
pub fn find_duplicate(
    rows: &[InventoryRow],
    exclude_row: usize,
    language: &str,
    set_code: &str,
    collector_number: &str,
) -> Option<usize> {
    rows.iter().enumerate().find_map(|(index, row)| {
        let same = index != exclude_row
            && row.language == language
            && row.set_code == set_code
            && row.collector_number == collector_number;
        same.then_some(index)
    })
}
