//! Canonical ordering of collection rows
//!
//! Rows are ordered by release date, then set code, then collector number.
//! Collector numbers compare by their leading text and then by their digits
//! as an integer, so "2" sorts before "10".

use crate::error::{CatalogError, Result};
use crate::models::InventoryRow;
use chrono::NaiveDate;
use mtg_common::FACE_SEPARATOR;
use std::cmp::Ordering;

/// Sort key of a collector number: text before the first digit, then the
/// digits read as one integer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollectorKey {
    pub prefix: String,
    pub number: u64,
}

/// Builds the collector key from the first face of a collector number.
///
/// A number without digits gets 0; digit runs too long for `u64` saturate.
pub fn collector_key(collector_number: &str) -> CollectorKey {
    let first_face = collector_number
        .split(FACE_SEPARATOR)
        .next()
        .unwrap_or_default();

    let prefix_end = first_face
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(first_face.len());
    let digits: String = first_face.chars().filter(|c| c.is_ascii_digit()).collect();
    let number = if digits.is_empty() {
        0
    } else {
        digits.parse::<u64>().unwrap_or(u64::MAX)
    };

    CollectorKey {
        prefix: first_face[..prefix_end].to_string(),
        number,
    }
}

/// Parses an ISO `YYYY-MM-DD` release date
pub fn parse_release_date(row: usize, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CatalogError::InvalidReleaseDate {
            row,
            value: value.to_string(),
        }
    })
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct SortKey {
    release_date: NaiveDate,
    set_code: String,
    collector: CollectorKey,
}

fn sort_key(row_index: usize, row: &InventoryRow) -> Result<SortKey> {
    Ok(SortKey {
        release_date: parse_release_date(row_index, &row.release_date)?,
        set_code: row.set_code.clone(),
        collector: collector_key(&row.collector_number),
    })
}

/// Compares two rows canonically. Fails if either release date is malformed.
pub fn compare_rows(a: &InventoryRow, b: &InventoryRow) -> Result<Ordering> {
    Ok(sort_key(0, a)?.cmp(&sort_key(1, b)?))
}

/// Sorts rows into canonical order. Rows with equal keys keep their relative
/// order. A malformed release date fails the whole sort and leaves `rows`
/// untouched.
pub fn sort_rows(rows: &mut Vec<InventoryRow>) -> Result<()> {
    let keys = rows
        .iter()
        .enumerate()
        .map(|(index, row)| sort_key(index, row))
        .collect::<Result<Vec<_>>>()?;

    let mut keyed: Vec<(SortKey, InventoryRow)> = keys.into_iter().zip(rows.drain(..)).collect();
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    rows.extend(keyed.into_iter().map(|(_, row)| row));
    Ok(())
}

/// Whether `rows` are already in canonical order
pub fn is_sorted(rows: &[InventoryRow]) -> Result<bool> {
    for pair in rows.windows(2) {
        if compare_rows(&pair[0], &pair[1])? == Ordering::Greater {
            return Ok(false);
        }
    }
    Ok(true)
}
