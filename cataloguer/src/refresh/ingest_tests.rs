use super::*;
use mtg_common::reference::read_with_freshness;
use mtg_common::ReferenceIndex;
use zip::write::FileOptions;

const BULK_SAMPLE: &str = r#"[
  {"object": "card", "id": "a1", "lang": "en", "released_at": "1993-08-05",
   "name": "Lightning Bolt", "type_line": "Instant", "color_identity": ["R"],
   "set_name": "Limited Edition Alpha", "set": "lea", "collector_number": "161",
   "prices": {"usd": "450.00", "usd_foil": null, "eur": "300.00"},
   "legalities": {"vintage": "legal"}},
  {"object": "card", "id": "a2", "lang": "ja", "released_at": "2022-02-18",
   "name": "Fable of the Mirror-Breaker // Reflection of Kiki-Jiki",
   "type_line": "Enchantment - Saga // Enchantment Creature - Goblin Shaman",
   "color_identity": ["R"], "set_name": "Kamigawa: Neon Dynasty", "set": "neo",
   "collector_number": "141", "prices": {"usd": null, "usd_foil": null}}
]"#;

fn deck_json() -> String {
    r#"{"meta": {"date": "2024-10-01"}, "data": {
        "name": "Elven Empire",
        "commander": [
          {"language": "English", "name": "Lathril, Blade of the Elves", "type": "Legendary Creature",
           "colorIdentity": ["B", "G"], "setCode": "KHC", "number": "2", "count": 1, "isFoil": true}
        ],
        "mainBoard": [
          {"language": "English", "name": "Forest", "type": "Basic Land", "colorIdentity": ["G"],
           "setCode": "KHC", "number": "117", "count": 12},
          {"language": "Portuguese (Brazil)", "name": "Elvish Mystic", "type": "Creature",
           "colorIdentity": ["G"], "setCode": "KHC", "number": "86", "count": 1, "isFoil": false}
        ]
    }}"#
    .to_string()
}

// ── bulk cards ──

#[test]
fn bulk_cards_are_projected_to_reference_records() {
    let mut out = Vec::new();
    let count = rewrite_bulk_cards(BULK_SAMPLE.as_bytes(), &mut out, "2024-10-01T09:04:35+00:00").unwrap();
    assert_eq!(count, 2);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("all_cards.json");
    std::fs::write(&path, &out).unwrap();

    let (freshness, records) = read_with_freshness::<Vec<CardRecord>>(&path).unwrap();
    assert_eq!(freshness, "2024-10-01T09:04:35+00:00");
    assert_eq!(records[0].name, "Lightning Bolt");
    assert_eq!(records[0].release_date, "1993-08-05");
    assert_eq!(records[0].usd.as_deref(), Some("450.00"));
    assert_eq!(records[0].usd_foil, None);
    assert_eq!(records[1].language, "ja");
    assert_eq!(records[1].set_code, "neo");

    let index = ReferenceIndex::try_load(&path).unwrap();
    assert_eq!(index.len(), 2);
    assert!(index.lookup("en", "lea", "161").is_some());
}

#[test]
fn empty_bulk_array_writes_empty_body() {
    let mut out = Vec::new();
    let count = rewrite_bulk_cards("[]".as_bytes(), &mut out, "stamp").unwrap();
    assert_eq!(count, 0);
    assert_eq!(String::from_utf8(out).unwrap(), "stamp\n[\n\n]");
}

#[test]
fn bulk_rewrite_rejects_non_array() {
    let mut out = Vec::new();
    assert!(rewrite_bulk_cards(r#"{"data": []}"#.as_bytes(), &mut out, "stamp").is_err());
}

#[test]
fn bulk_file_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("download.json");
    let dest = dir.path().join("all_cards.json");
    std::fs::write(&source, BULK_SAMPLE).unwrap();

    assert_eq!(rewrite_bulk_file(&source, &dest, "stamp").unwrap(), 2);
    assert_eq!(mtg_common::reference::read_freshness(&dest).unwrap(), "stamp");
}

// ── decks ──

#[test]
fn language_names_become_codes() {
    assert_eq!(language_code("English"), "en");
    assert_eq!(language_code("Portuguese (Brazil)"), "pt");
    assert_eq!(language_code("Chinese Simplified"), "zhs");
    assert_eq!(language_code("Klingon"), "Klingon");
}

#[test]
fn deck_rows_put_commander_first() {
    let file: DeckFile = serde_json::from_str(&deck_json()).unwrap();
    let rows = deck_to_rows(file.data);

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].name, "Lathril, Blade of the Elves");
    assert_eq!(rows[0].quantity_foil, "1");
    assert_eq!(rows[0].color_identity, "B,G");
    assert_eq!(rows[1].set_code, "khc");
    assert_eq!(rows[1].quantity, "12");
    assert_eq!(rows[1].quantity_foil, "0");
    assert_eq!(rows[1].storage_areas, "N/A");
    assert_eq!(rows[2].language, "pt");
    assert_eq!(rows[2].release_date, "");
}

#[test]
fn deck_file_is_rewritten_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ElvenEmpire_KHC.json");
    std::fs::write(&path, deck_json()).unwrap();

    assert_eq!(rewrite_deck_file(&path).unwrap(), 3);

    let rows = crate::persistence::load_inventory(&path).unwrap();
    assert_eq!(rows[1].name, "Forest");
    assert_eq!(rows[1].collector_number, "117");
}

#[test]
fn archive_is_extracted_rewritten_and_removed() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("AllDeckFiles.zip");
    {
        let mut zip = zip::ZipWriter::new(File::create(&archive).unwrap());
        zip.start_file("ElvenEmpire_KHC.json", FileOptions::default()).unwrap();
        zip.write_all(deck_json().as_bytes()).unwrap();
        zip.start_file("Broken_XXX.json", FileOptions::default()).unwrap();
        zip.write_all(b"{ not a deck").unwrap();
        zip.finish().unwrap();
    }
    let dest = dir.path().join("AllDeckFiles");

    let installed = install_deck_archive(&archive, &dest).unwrap();

    assert_eq!(installed, 1);
    assert!(!archive.exists());
    let rows = crate::persistence::load_inventory(&dest.join("ElvenEmpire_KHC.json")).unwrap();
    assert_eq!(rows.len(), 3);
}

#[test]
fn missing_archive_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = install_deck_archive(&dir.path().join("missing.zip"), &dir.path().join("out"));
    assert!(result.is_err());
}
