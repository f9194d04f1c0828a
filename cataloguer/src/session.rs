//! Editing a loaded collection table
//!
//! An [`EditSession`] owns the rows of one collection file together with the
//! reference data used to fill them in. Every change goes through a
//! [`Command`] that is pushed on the undo stack; undo and redo replay the same
//! recomputation pipeline as a fresh edit.

use crate::columns::Column;
use crate::derivation::{update_card_fields, update_storage_quantity, update_totals};
use crate::duplicates::{find_duplicate, DuplicateDecision, DuplicateFound};
use crate::error::{CatalogError, Result};
use crate::models::InventoryRow;
use crate::ordering::sort_rows;
use crate::vocabulary::Vocabulary;
use mtg_common::{CardKey, ReferenceIndex};
use std::sync::Arc;

/// A reversible change to the table
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    EditCell {
        row: usize,
        column: Column,
        old: String,
        new: String,
    },
    AddRow {
        row: usize,
    },
    DeleteRow {
        row: usize,
        data: InventoryRow,
    },
}

/// Result of a cell edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Committed,
    /// Not committed; the identity already exists at this row
    Redirected(usize),
    Cancelled,
    /// New value equals the old one, nothing recorded
    Unchanged,
}

#[derive(Debug)]
pub struct EditSession {
    rows: Vec<InventoryRow>,
    index: Arc<ReferenceIndex>,
    vocabulary: Vocabulary,
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl EditSession {
    pub fn new(rows: Vec<InventoryRow>, index: Arc<ReferenceIndex>, vocabulary: Vocabulary) -> Self {
        Self {
            rows,
            index,
            vocabulary,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[InventoryRow] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&InventoryRow> {
        self.rows.get(row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<InventoryRow> {
        self.rows
    }

    /// Use a newly loaded reference index for subsequent lookups
    pub fn set_reference_index(&mut self, index: Arc<ReferenceIndex>) {
        self.index = index;
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row < self.rows.len() {
            Ok(())
        } else {
            Err(CatalogError::RowOutOfRange {
                row,
                len: self.rows.len(),
            })
        }
    }

    fn push(&mut self, command: Command) {
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Edits one cell.
    ///
    /// Set and language values are checked against the vocabulary first. When
    /// the column is part of the identity and the edited triple is complete,
    /// `on_duplicate` is asked what to do if another row already has it.
    pub fn edit_cell<F>(
        &mut self,
        row: usize,
        column: Column,
        value: &str,
        on_duplicate: F,
    ) -> Result<EditOutcome>
    where
        F: FnOnce(&DuplicateFound) -> DuplicateDecision,
    {
        self.check_row(row)?;
        if !column.is_editable() {
            return Err(CatalogError::ReadOnlyColumn(column.label()));
        }
        self.vocabulary.validate(column, value)?;

        let old = self.rows[row].get(column).to_string();
        if old == value {
            return Ok(EditOutcome::Unchanged);
        }

        if column.is_identity() {
            let mut key = self.rows[row].key();
            match column {
                Column::Language => key.language = value.to_string(),
                Column::Set => key.set_code = value.to_string(),
                _ => key.collector_number = value.to_string(),
            }
            if let Some(outcome) = self.check_duplicate(row, key, on_duplicate) {
                return Ok(outcome);
            }
        }

        self.apply_value(row, column, value);
        self.push(Command::EditCell {
            row,
            column,
            old,
            new: value.to_string(),
        });
        Ok(EditOutcome::Committed)
    }

    fn check_duplicate<F>(&self, row: usize, key: CardKey, on_duplicate: F) -> Option<EditOutcome>
    where
        F: FnOnce(&DuplicateFound) -> DuplicateDecision,
    {
        if !key.is_complete() {
            return None;
        }
        let existing = find_duplicate(
            &self.rows,
            row,
            &key.language,
            &key.set_code,
            &key.collector_number,
        )?;
        let found = DuplicateFound { row, existing, key };
        match on_duplicate(&found) {
            DuplicateDecision::Redirect => {
                log::info!("{} already exists at row {}", found.key, existing);
                Some(EditOutcome::Redirected(existing))
            }
            DuplicateDecision::Cancel => Some(EditOutcome::Cancelled),
            DuplicateDecision::KeepBoth => None,
        }
    }

    /// Writes a value and recomputes everything that depends on it
    fn apply_value(&mut self, row: usize, column: Column, value: &str) {
        let Some(target) = self.rows.get_mut(row) else {
            return;
        };
        target.set(column, value);

        if column.affects_storage() {
            update_storage_quantity(target);
        }
        if column.is_identity() {
            if update_card_fields(target, &self.index) {
                update_totals(target);
            }
        } else if column.affects_totals() {
            update_totals(target);
        }
        log::debug!("Row {} {} set to '{}'", row, column, value);
    }

    /// Appends a blank row and returns its index
    pub fn add_row(&mut self) -> usize {
        let row = self.rows.len();
        self.rows.push(InventoryRow::default());
        self.push(Command::AddRow { row });
        row
    }

    /// Edits several cells of one row in order. Cells that already hold their
    /// value are skipped. Stops at the first duplicate that is redirected or
    /// cancelled and returns that outcome.
    pub fn fill_row<F>(
        &mut self,
        row: usize,
        cells: &[(Column, &str)],
        mut on_duplicate: F,
    ) -> Result<EditOutcome>
    where
        F: FnMut(&DuplicateFound) -> DuplicateDecision,
    {
        let mut result = EditOutcome::Unchanged;
        for &(column, value) in cells {
            match self.edit_cell(row, column, value, &mut on_duplicate)? {
                EditOutcome::Unchanged => {}
                EditOutcome::Committed => result = EditOutcome::Committed,
                stopped => return Ok(stopped),
            }
        }
        Ok(result)
    }

    /// Removes a row, keeping its contents for undo
    pub fn delete_row(&mut self, row: usize) -> Result<InventoryRow> {
        self.check_row(row)?;
        let data = self.rows.remove(row);
        self.push(Command::DeleteRow {
            row,
            data: data.clone(),
        });
        Ok(data)
    }

    /// Reverts the most recent command. Returns false if there was none.
    pub fn undo(&mut self) -> bool {
        let Some(command) = self.undo_stack.pop() else {
            return false;
        };
        match &command {
            Command::EditCell {
                row, column, old, ..
            } => self.apply_value(*row, *column, old),
            Command::AddRow { row } => {
                if *row < self.rows.len() {
                    self.rows.remove(*row);
                }
            }
            Command::DeleteRow { row, data } => {
                let at = (*row).min(self.rows.len());
                self.rows.insert(at, data.clone());
            }
        }
        self.redo_stack.push(command);
        true
    }

    /// Re-applies the most recently undone command. Returns false if there
    /// was none.
    pub fn redo(&mut self) -> bool {
        let Some(command) = self.redo_stack.pop() else {
            return false;
        };
        match &command {
            Command::EditCell {
                row, column, new, ..
            } => self.apply_value(*row, *column, new),
            Command::AddRow { row } => {
                let at = (*row).min(self.rows.len());
                self.rows.insert(at, InventoryRow::default());
            }
            Command::DeleteRow { row, .. } => {
                if *row < self.rows.len() {
                    self.rows.remove(*row);
                }
            }
        }
        self.undo_stack.push(command);
        true
    }

    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Sorts rows canonically. History refers to row positions, so it is
    /// cleared once the rows have moved.
    pub fn sort(&mut self) -> Result<()> {
        sort_rows(&mut self.rows)?;
        self.clear_history();
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
