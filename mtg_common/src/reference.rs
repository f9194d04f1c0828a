//! Reference card index and the freshness-prefixed file format
//!
//! Reference files start with one line of freshness metadata (a remote
//! timestamp) followed by a JSON document. The index is built once from such a
//! file and never mutated; reloads build a new index and swap it in.

use crate::card::{CardKey, CardRecord};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Opens a freshness-prefixed file, returning the freshness token and a reader
/// positioned at the start of the JSON body.
pub fn open_with_freshness(path: &Path) -> Result<(String, BufReader<File>)> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut first_line = String::new();
    if reader.read_line(&mut first_line)? == 0 {
        return Err(Error::MissingFreshnessLine(path.to_path_buf()));
    }
    Ok((first_line.trim().to_string(), reader))
}

/// Reads only the freshness token of a file
pub fn read_freshness(path: &Path) -> Result<String> {
    open_with_freshness(path).map(|(freshness, _)| freshness)
}

/// Reads a freshness-prefixed JSON file
pub fn read_with_freshness<T: DeserializeOwned>(path: &Path) -> Result<(String, T)> {
    let (freshness, reader) = open_with_freshness(path)?;
    let body = serde_json::from_reader(reader)?;
    Ok((freshness, body))
}

/// Writes a freshness line followed by `body` as JSON, overwriting the file
pub fn write_with_freshness<T: Serialize + ?Sized>(
    path: &Path,
    freshness: &str,
    body: &T,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{}", freshness)?;
    serde_json::to_writer(&mut writer, body)?;
    writer.flush()?;
    Ok(())
}

/// Reads the set-code vocabulary (`sets.json`)
pub fn read_set_codes(path: &Path) -> Result<Vec<String>> {
    read_with_freshness::<Vec<String>>(path).map(|(_, codes)| codes)
}

/// Card lookup keyed by identity triple
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    cards: HashMap<CardKey, CardRecord>,
    freshness: Option<String>,
}

impl ReferenceIndex {
    /// Builds an index; later records replace earlier ones with the same key
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CardRecord>,
    {
        let cards = records
            .into_iter()
            .map(|record| (record.key(), record))
            .collect();
        Self {
            cards,
            freshness: None,
        }
    }

    /// Loads an index from a reference file, failing on missing or malformed input
    pub fn try_load(path: &Path) -> Result<Self> {
        log::info!("Loading reference cards from: {}", path.display());
        let (freshness, records) = read_with_freshness::<Vec<CardRecord>>(path)?;
        let mut index = Self::from_records(records);
        index.freshness = Some(freshness);
        log::info!(
            "Loaded {} reference cards (updated: {})",
            index.len(),
            index.freshness().unwrap_or("unknown")
        );
        Ok(index)
    }

    /// Loads an index, degrading to an empty index when the file is unusable
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(index) => index,
            Err(e) => {
                log::warn!(
                    "Reference file {} not found or corrupted, card lookups disabled: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Look up a printing by its exact identity triple
    pub fn lookup(
        &self,
        language: &str,
        set_code: &str,
        collector_number: &str,
    ) -> Option<&CardRecord> {
        self.cards
            .get(&CardKey::new(language, set_code, collector_number))
    }

    /// Freshness token of the file this index was loaded from
    pub fn freshness(&self) -> Option<&str> {
        self.freshness.as_deref()
    }

    /// Get the number of cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Shared handle to the current reference index.
///
/// Readers take a snapshot with [`SharedReferenceIndex::current`]; a reload
/// builds the replacement completely before swapping it in, so a snapshot is
/// never partially populated.
#[derive(Debug, Clone, Default)]
pub struct SharedReferenceIndex {
    inner: Arc<RwLock<Arc<ReferenceIndex>>>,
}

impl SharedReferenceIndex {
    pub fn new(index: ReferenceIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(index))),
        }
    }

    /// Snapshot of the index currently in use
    pub fn current(&self) -> Arc<ReferenceIndex> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    /// Swap in a fully built index
    pub fn replace(&self, index: ReferenceIndex) {
        let index = Arc::new(index);
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = index;
    }

    /// Rebuild from `path` and swap; returns the new card count
    pub fn reload(&self, path: &Path) -> usize {
        let index = ReferenceIndex::load(path);
        let count = index.len();
        self.replace(index);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn record(lang: &str, set: &str, cn: &str, name: &str) -> CardRecord {
        CardRecord {
            language: lang.to_string(),
            set_code: set.to_string(),
            collector_number: cn.to_string(),
            name: name.to_string(),
            ..CardRecord::default()
        }
    }

    fn reference_file(content: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "{content}").unwrap();
        tmp
    }

    #[test]
    fn lookup_by_exact_triple() {
        let index = ReferenceIndex::from_records(vec![
            record("en", "lea", "161", "Lightning Bolt"),
            record("de", "lea", "161", "Blitzschlag"),
        ]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("de", "lea", "161").unwrap().name, "Blitzschlag");
        assert!(index.lookup("en", "LEA", "161").is_none());
        assert!(index.lookup("en", "lea", "162").is_none());
    }

    #[test]
    fn later_records_replace_earlier() {
        let index = ReferenceIndex::from_records(vec![
            record("en", "lea", "1", "Old"),
            record("en", "lea", "1", "New"),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("en", "lea", "1").unwrap().name, "New");
    }

    #[test]
    fn load_skips_freshness_line() {
        let tmp = reference_file(
            "2024-06-01T09:00:00+00:00\n[{\"lang\":\"en\",\"set\":\"lea\",\"collector_number\":\"161\",\"name\":\"Lightning Bolt\"}]",
        );

        let index = ReferenceIndex::try_load(tmp.path()).unwrap();
        assert_eq!(index.freshness(), Some("2024-06-01T09:00:00+00:00"));
        assert_eq!(index.lookup("en", "lea", "161").unwrap().name, "Lightning Bolt");
    }

    #[test]
    fn pure_json_is_rejected_by_strict_load() {
        // The first line is consumed as metadata, leaving a truncated body
        let tmp = reference_file("[\n{\"lang\":\"en\",\"set\":\"lea\",\"collector_number\":\"1\"}\n]");
        assert!(ReferenceIndex::try_load(tmp.path()).is_err());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let tmp = reference_file("2024-06-01\n{ not json");
        let index = ReferenceIndex::load(tmp.path());
        assert!(index.is_empty());
    }

    #[test]
    fn missing_file_loads_empty() {
        let index = ReferenceIndex::load(Path::new("/nonexistent/all_cards.json"));
        assert!(index.is_empty());
        assert!(index.freshness().is_none());
    }

    #[test]
    fn empty_file_has_no_freshness_line() {
        let tmp = reference_file("");
        match read_freshness(tmp.path()) {
            Err(Error::MissingFreshnessLine(_)) => {}
            other => panic!("Expected MissingFreshnessLine, got: {other:?}"),
        }
    }

    #[test]
    fn write_then_read_set_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sets.json");
        let codes = vec!["lea".to_string(), "leb".to_string()];

        write_with_freshness(&path, "1993-10-04", &codes).unwrap();

        assert_eq!(read_freshness(&path).unwrap(), "1993-10-04");
        assert_eq!(read_set_codes(&path).unwrap(), codes);
    }

    #[test]
    fn shared_index_swaps_on_reload() {
        let shared = SharedReferenceIndex::new(ReferenceIndex::from_records(vec![record(
            "en", "lea", "1", "Old",
        )]));
        let snapshot = shared.current();

        let tmp = reference_file(
            "fresh\n[{\"lang\":\"en\",\"set\":\"leb\",\"collector_number\":\"2\",\"name\":\"New\"}]",
        );
        assert_eq!(shared.reload(tmp.path()), 1);

        // Old snapshot is untouched, new readers see the replacement
        assert!(snapshot.lookup("en", "lea", "1").is_some());
        assert!(shared.current().lookup("en", "lea", "1").is_none());
        assert_eq!(shared.current().lookup("en", "leb", "2").unwrap().name, "New");
    }
}
