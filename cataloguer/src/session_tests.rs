use super::*;
use crate::columns::DeckSlot;
use mtg_common::CardRecord;

fn reference() -> Arc<ReferenceIndex> {
    Arc::new(ReferenceIndex::from_records(vec![
        CardRecord {
            language: "en".to_string(),
            set_code: "xyz".to_string(),
            collector_number: "1".to_string(),
            name: "Test Angel".to_string(),
            release_date: "2020-01-01".to_string(),
            type_line: "Creature".to_string(),
            color_identity: vec!["W".to_string()],
            set_name: "Test Set".to_string(),
            usd: Some("2.00".to_string()),
            usd_foil: Some("5.00".to_string()),
        },
        CardRecord {
            language: "en".to_string(),
            set_code: "xyz".to_string(),
            collector_number: "2".to_string(),
            name: "Test Demon".to_string(),
            release_date: "2020-01-01".to_string(),
            usd: Some("0.50".to_string()),
            ..CardRecord::default()
        },
    ]))
}

fn row(lang: &str, set: &str, cn: &str) -> InventoryRow {
    InventoryRow {
        language: lang.to_string(),
        release_date: "2020-01-01".to_string(),
        set_code: set.to_string(),
        collector_number: cn.to_string(),
        ..InventoryRow::default()
    }
}

fn session(rows: Vec<InventoryRow>) -> EditSession {
    EditSession::new(rows, reference(), Vocabulary::new(["xyz", "abc"]))
}

fn never_asked(_: &DuplicateFound) -> DuplicateDecision {
    panic!("duplicate check should not have run")
}

// ── quantity edits ──

#[test]
fn deck_quantity_edit_and_undo() {
    let mut start = row("en", "xyz", "1");
    start.quantity = "10".to_string();
    start.deck_quantity = "3".to_string();
    start.storage_quantity = "7".to_string();
    let mut session = session(vec![start]);

    let outcome = session
        .edit_cell(0, Column::DeckQuantity(DeckSlot::One), "5", never_asked)
        .unwrap();
    assert_eq!(outcome, EditOutcome::Committed);
    assert_eq!(session.rows()[0].storage_quantity, "5");

    assert!(session.undo());
    assert_eq!(session.rows()[0].deck_quantity, "3");
    assert_eq!(session.rows()[0].storage_quantity, "7");

    assert!(session.redo());
    assert_eq!(session.rows()[0].deck_quantity, "5");
    assert_eq!(session.rows()[0].storage_quantity, "5");
}

#[test]
fn quantity_edit_updates_storage_and_totals() {
    let mut start = row("en", "xyz", "1");
    start.usd = "2.00".to_string();
    start.deck_quantity_two = "1".to_string();
    let mut session = session(vec![start]);

    session.edit_cell(0, Column::Quantity, "4", never_asked).unwrap();

    let edited = &session.rows()[0];
    assert_eq!(edited.storage_quantity, "3");
    assert_eq!(edited.total_usd, "8.00");
    assert_eq!(edited.total_usd_foil, "");
}

#[test]
fn foil_edit_only_touches_totals() {
    let mut start = row("en", "xyz", "1");
    start.quantity = "3".to_string();
    start.storage_quantity = "untouched".to_string();
    start.usd = "1.00".to_string();
    start.usd_foil = "4.00".to_string();
    let mut session = session(vec![start]);

    session.edit_cell(0, Column::QuantityFoil, "1", never_asked).unwrap();

    let edited = &session.rows()[0];
    assert_eq!(edited.storage_quantity, "untouched");
    assert_eq!(edited.total_usd, "2.00");
    assert_eq!(edited.total_usd_foil, "4.00");
}

#[test]
fn non_numeric_input_counts_as_zero() {
    let mut start = row("en", "xyz", "1");
    start.quantity = "5".to_string();
    let mut session = session(vec![start]);

    session
        .edit_cell(0, Column::DeckQuantity(DeckSlot::Three), "a few", never_asked)
        .unwrap();
    assert_eq!(session.rows()[0].storage_quantity, "5");
}

#[test]
fn unchanged_value_is_not_recorded() {
    let mut start = row("en", "xyz", "1");
    start.quantity = "2".to_string();
    let mut session = session(vec![start]);

    let outcome = session.edit_cell(0, Column::Quantity, "2", never_asked).unwrap();
    assert_eq!(outcome, EditOutcome::Unchanged);
    assert!(!session.can_undo());
}

// ── identity edits ──

#[test]
fn identity_edit_fills_display_fields() {
    let mut start = row("en", "xyz", "");
    start.quantity = "2".to_string();
    let mut session = session(vec![start]);

    session.edit_cell(0, Column::CollectorNumber, "1", never_asked).unwrap();

    let edited = &session.rows()[0];
    assert_eq!(edited.name, "Test Angel");
    assert_eq!(edited.color_identity, "W");
    assert_eq!(edited.set_name, "Test Set");
    assert_eq!(edited.usd, "2.00");
    assert_eq!(edited.total_usd, "4.00");
}

#[test]
fn identity_miss_keeps_display_fields() {
    let mut start = row("en", "xyz", "1");
    start.name = "Test Angel".to_string();
    let mut session = session(vec![start]);

    session.edit_cell(0, Column::CollectorNumber, "99", never_asked).unwrap();

    assert_eq!(session.rows()[0].collector_number, "99");
    assert_eq!(session.rows()[0].name, "Test Angel");
}

#[test]
fn duplicate_redirect_does_not_commit() {
    let mut session = session(vec![row("en", "xyz", "1"), row("en", "abc", "1")]);
    let mut asked = None;

    let outcome = session
        .edit_cell(1, Column::Set, "xyz", |found| {
            asked = Some(found.clone());
            DuplicateDecision::Redirect
        })
        .unwrap();

    assert_eq!(outcome, EditOutcome::Redirected(0));
    let found = asked.unwrap();
    assert_eq!(found.row, 1);
    assert_eq!(found.key, CardKey::new("en", "xyz", "1"));
    assert_eq!(session.rows()[1].set_code, "abc");
    assert!(!session.can_undo());
}

#[test]
fn duplicate_cancel_does_not_commit() {
    let mut session = session(vec![row("en", "xyz", "1"), row("en", "xyz", "2")]);

    let outcome = session
        .edit_cell(1, Column::CollectorNumber, "1", |_| DuplicateDecision::Cancel)
        .unwrap();

    assert_eq!(outcome, EditOutcome::Cancelled);
    assert_eq!(session.rows()[1].collector_number, "2");
}

#[test]
fn duplicate_keep_both_commits() {
    let mut session = session(vec![row("en", "xyz", "1"), row("en", "xyz", "2")]);

    let outcome = session
        .edit_cell(1, Column::CollectorNumber, "1", |_| DuplicateDecision::KeepBoth)
        .unwrap();

    assert_eq!(outcome, EditOutcome::Committed);
    assert_eq!(session.rows()[0].key(), session.rows()[1].key());
    assert_eq!(session.rows()[1].name, "Test Angel");
}

#[test]
fn incomplete_triple_skips_duplicate_check() {
    let mut session = session(vec![row("", "xyz", "1"), row("", "abc", "1")]);
    let outcome = session.edit_cell(1, Column::Set, "xyz", never_asked).unwrap();
    assert_eq!(outcome, EditOutcome::Committed);
}

#[test]
fn undo_of_identity_edit_does_not_prompt() {
    let mut session = session(vec![row("en", "xyz", "1"), row("en", "xyz", "2")]);
    session
        .edit_cell(1, Column::CollectorNumber, "1", |_| DuplicateDecision::KeepBoth)
        .unwrap();

    assert!(session.undo());
    assert_eq!(session.rows()[1].collector_number, "2");
    assert_eq!(session.rows()[1].name, "Test Demon");
    assert!(session.redo());
    assert_eq!(session.rows()[1].collector_number, "1");
}

// ── validation ──

#[test]
fn invalid_set_is_rejected() {
    let mut session = session(vec![row("en", "xyz", "1")]);
    let result = session.edit_cell(0, Column::Set, "nope", never_asked);

    assert!(matches!(result, Err(CatalogError::InvalidSetCode(_))));
    assert_eq!(session.rows()[0].set_code, "xyz");
    assert!(!session.can_undo());
}

#[test]
fn invalid_language_is_rejected() {
    let mut session = session(vec![row("en", "xyz", "1")]);
    let result = session.edit_cell(0, Column::Language, "klingon", never_asked);
    assert!(matches!(result, Err(CatalogError::InvalidLanguage(_))));
}

#[test]
fn derived_columns_cannot_be_edited() {
    let mut session = session(vec![row("en", "xyz", "1")]);
    let result = session.edit_cell(0, Column::StorageQuantity, "3", never_asked);
    assert!(matches!(result, Err(CatalogError::ReadOnlyColumn("Storage Quantity"))));
}

#[test]
fn row_out_of_range() {
    let mut session = session(vec![]);
    let result = session.edit_cell(0, Column::Quantity, "1", never_asked);
    assert!(matches!(result, Err(CatalogError::RowOutOfRange { row: 0, len: 0 })));
}

// ── row commands ──

#[test]
fn add_row_and_undo() {
    let mut session = session(vec![row("en", "xyz", "1")]);

    let added = session.add_row();
    assert_eq!(added, 1);
    assert_eq!(session.len(), 2);
    assert_eq!(session.rows()[1], InventoryRow::default());

    assert!(session.undo());
    assert_eq!(session.len(), 1);
    assert!(session.redo());
    assert_eq!(session.len(), 2);
}

#[test]
fn fill_row_skips_cells_that_already_match() {
    let mut session = session(vec![row("en", "xyz", "2")]);
    let added = session.add_row();

    let outcome = session
        .fill_row(
            added,
            &[
                (Column::Quantity, ""),
                (Column::Language, "en"),
                (Column::Set, "xyz"),
                (Column::CollectorNumber, "1"),
            ],
            never_asked,
        )
        .unwrap();

    assert_eq!(outcome, EditOutcome::Committed);
    assert_eq!(session.len(), 2);
    assert_eq!(session.rows()[added].name, "Test Angel");
}

#[test]
fn fill_row_stops_at_redirect() {
    let mut session = session(vec![row("en", "xyz", "1")]);
    let added = session.add_row();

    let outcome = session
        .fill_row(
            added,
            &[
                (Column::Language, "en"),
                (Column::Set, "xyz"),
                (Column::CollectorNumber, "1"),
                (Column::Quantity, "4"),
            ],
            |_| DuplicateDecision::Redirect,
        )
        .unwrap();

    assert_eq!(outcome, EditOutcome::Redirected(0));
    assert_eq!(session.rows()[added].collector_number, "");
    assert_eq!(session.rows()[added].quantity, "");
}

#[test]
fn fill_row_with_nothing_new_is_unchanged() {
    let mut session = session(vec![row("en", "xyz", "1")]);
    let outcome = session
        .fill_row(0, &[(Column::Language, "en")], never_asked)
        .unwrap();
    assert_eq!(outcome, EditOutcome::Unchanged);
}

#[test]
fn delete_row_and_undo_restores_contents() {
    let mut middle = row("en", "xyz", "2");
    middle.quantity = "9".to_string();
    let mut session = session(vec![row("en", "xyz", "1"), middle.clone(), row("en", "xyz", "3")]);

    let removed = session.delete_row(1).unwrap();
    assert_eq!(removed, middle);
    assert_eq!(session.len(), 2);

    assert!(session.undo());
    assert_eq!(session.rows()[1], middle);

    assert!(session.redo());
    assert_eq!(session.rows()[1].collector_number, "3");
}

#[test]
fn new_command_clears_redo() {
    let mut session = session(vec![row("en", "xyz", "1")]);
    session.edit_cell(0, Column::Quantity, "1", never_asked).unwrap();
    session.undo();
    assert!(session.can_redo());

    session.edit_cell(0, Column::Quantity, "2", never_asked).unwrap();
    assert!(!session.can_redo());
}

#[test]
fn undo_and_redo_on_empty_history() {
    let mut session = session(vec![]);
    assert!(!session.undo());
    assert!(!session.redo());
}

#[test]
fn sort_clears_history() {
    let mut later = row("en", "xyz", "1");
    later.release_date = "2023-01-01".to_string();
    let mut session = session(vec![later, row("en", "xyz", "2")]);
    session.edit_cell(0, Column::Quantity, "1", never_asked).unwrap();

    session.sort().unwrap();

    assert_eq!(session.rows()[0].collector_number, "2");
    assert!(!session.can_undo());
}
