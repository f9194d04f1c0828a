//! Rewriting downloaded source data into the working formats
//!
//! Scryfall bulk cards become reference records; MTGJSON deck files become
//! collection rows. Both run on blocking threads since the inputs are large.

use crate::error::Result;
use crate::models::InventoryRow;
use crate::persistence::write_inventory;
use mtg_common::de::{letters, loose_string, nullable_string};
use mtg_common::{CardRecord, Language};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

// ── Scryfall bulk cards ──

#[derive(Debug, Default, Deserialize)]
struct Prices {
    #[serde(default)]
    usd: Option<String>,
    #[serde(default)]
    usd_foil: Option<String>,
}

/// The subset of a Scryfall card object kept in the reference file
#[derive(Debug, Default, Deserialize)]
pub struct ScryfallCard {
    #[serde(default, deserialize_with = "nullable_string")]
    lang: String,
    #[serde(default, deserialize_with = "nullable_string")]
    released_at: String,
    #[serde(default, deserialize_with = "nullable_string")]
    name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    type_line: String,
    #[serde(default, deserialize_with = "letters")]
    color_identity: Vec<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    set_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    set: String,
    #[serde(default, deserialize_with = "nullable_string")]
    collector_number: String,
    #[serde(default)]
    prices: Option<Prices>,
}

impl From<ScryfallCard> for CardRecord {
    fn from(card: ScryfallCard) -> Self {
        let prices = card.prices.unwrap_or_default();
        CardRecord {
            language: card.lang,
            release_date: card.released_at,
            name: card.name,
            type_line: card.type_line,
            color_identity: card.color_identity,
            set_name: card.set_name,
            set_code: card.set,
            collector_number: card.collector_number,
            usd: prices.usd,
            usd_foil: prices.usd_foil,
        }
    }
}

/// Writes each card of a JSON array as it is parsed, so the full bulk file
/// is never held in memory.
struct CardWriter<'w, W> {
    out: &'w mut W,
}

impl<'de, 'w, W: Write> Visitor<'de> for CardWriter<'w, W> {
    type Value = usize;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an array of Scryfall card objects")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<usize, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut count = 0;
        while let Some(card) = seq.next_element::<ScryfallCard>()? {
            if count > 0 {
                self.out.write_all(b",\n").map_err(<A::Error as de::Error>::custom)?;
            }
            let record = CardRecord::from(card);
            serde_json::to_writer(&mut *self.out, &record).map_err(<A::Error as de::Error>::custom)?;
            count += 1;
        }
        Ok(count)
    }
}

/// Streams a Scryfall card array from `reader` into a reference file body
/// prefixed with `freshness`. Returns the number of cards written.
pub fn rewrite_bulk_cards<R: Read, W: Write>(reader: R, mut out: W, freshness: &str) -> Result<usize> {
    writeln!(out, "{}", freshness)?;
    out.write_all(b"[\n")?;

    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    let count = deserializer.deserialize_seq(CardWriter { out: &mut out })?;
    deserializer.end()?;

    out.write_all(b"\n]")?;
    out.flush()?;
    Ok(count)
}

/// File-to-file variant of [`rewrite_bulk_cards`]
pub fn rewrite_bulk_file(source: &Path, dest: &Path, freshness: &str) -> Result<usize> {
    let reader = BufReader::new(File::open(source)?);
    let writer = BufWriter::new(File::create(dest)?);
    let count = rewrite_bulk_cards(reader, writer, freshness)?;
    log::info!("Wrote {} reference cards to {}", count, dest.display());
    Ok(count)
}

// ── MTGJSON deck files ──

/// A card entry of an MTGJSON deck
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckCard {
    #[serde(default, deserialize_with = "nullable_string")]
    pub language: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "nullable_string")]
    pub type_line: String,
    #[serde(default, deserialize_with = "letters")]
    pub color_identity: Vec<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub set_code: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub number: String,
    #[serde(default = "one")]
    pub count: i64,
    #[serde(default)]
    pub is_foil: bool,
}

fn one() -> i64 {
    1
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub commander: Vec<DeckCard>,
    #[serde(default)]
    pub main_board: Vec<DeckCard>,
}

#[derive(Debug, Deserialize)]
struct DeckFile {
    data: Deck,
}

/// Converts an MTGJSON language name ("Portuguese (Brazil)") to its code.
/// Names that are not recognized are kept as they are.
pub fn language_code(name: &str) -> String {
    Language::parse(name)
        .map(|lang| lang.code().to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Builds a collection row from a deck card
pub fn deck_card_to_row(card: DeckCard) -> InventoryRow {
    let quantity_foil = if card.is_foil { card.count } else { 0 };
    InventoryRow {
        language: language_code(&card.language),
        name: card.name,
        type_line: card.type_line,
        color_identity: card.color_identity.join(","),
        set_code: card.set_code.to_lowercase(),
        collector_number: card.number,
        quantity: card.count.to_string(),
        quantity_foil: quantity_foil.to_string(),
        storage_areas: "N/A".to_string(),
        ..InventoryRow::default()
    }
}

/// Commander cards first, then the main board
pub fn deck_to_rows(deck: Deck) -> Vec<InventoryRow> {
    deck.commander
        .into_iter()
        .chain(deck.main_board)
        .map(deck_card_to_row)
        .collect()
}

/// Replaces an MTGJSON deck file with its collection rows
pub fn rewrite_deck_file(path: &Path) -> Result<usize> {
    let file: DeckFile = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    let rows = deck_to_rows(file.data);
    write_inventory(path, &rows)?;
    Ok(rows.len())
}

/// Extracts every file of a zip archive below `dest`. Returns the paths of
/// the extracted JSON files. Entries that would escape `dest` are skipped.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut zip = zip::ZipArchive::new(BufReader::new(File::open(archive)?))?;
    fs::create_dir_all(dest)?;

    let mut extracted = Vec::new();
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            log::warn!("Skipping unsafe archive entry: {}", entry.name());
            continue;
        };
        let target = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = BufWriter::new(File::create(&target)?);
        io::copy(&mut entry, &mut out)?;
        out.flush()?;

        if target.extension().is_some_and(|ext| ext == "json") {
            extracted.push(target);
        }
    }
    Ok(extracted)
}

/// Extracts the deck archive, rewrites every deck and removes the archive.
/// Decks that fail to rewrite are logged and skipped.
pub fn install_deck_archive(archive: &Path, dest: &Path) -> Result<usize> {
    let extracted = extract_archive(archive, dest);
    if let Err(e) = fs::remove_file(archive) {
        log::warn!("Could not remove {}: {}", archive.display(), e);
    }

    let mut rewritten = 0;
    for path in extracted? {
        match rewrite_deck_file(&path) {
            Ok(_) => rewritten += 1,
            Err(e) => log::warn!("Could not rewrite deck {}: {}", path.display(), e),
        }
    }
    log::info!("Installed {} decks into {}", rewritten, dest.display());
    Ok(rewritten)
}

#[cfg(test)]
#[path = "ingest_tests.rs"]
mod tests;
