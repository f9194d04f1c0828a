pub mod columns;
pub mod config;
pub mod decks;
pub mod derivation;
pub mod duplicates;
pub mod error;
pub mod export;
pub mod formatters;
pub mod merge;
pub mod models;
pub mod ordering;
pub mod persistence;
pub mod refresh;
pub mod session;
pub mod vocabulary;

// Re-export commonly used items
pub use columns::{Column, DeckSlot};
pub use config::Settings;
pub use decks::{DeckCatalog, DeckSummary};
pub use duplicates::{DuplicateDecision, DuplicateFound};
pub use error::{CatalogError, Result};
pub use export::{export_csv, export_sorted, Platform};
pub use formatters::{format_deck_list, format_inventory_table};
pub use merge::{import_decklist, merge_rows, MergeReport};
pub use models::InventoryRow;
pub use ordering::sort_rows;
pub use persistence::{import_deck_file, load_inventory, load_inventory_or_empty, save_inventory};
pub use refresh::{refresh_all, refresh_and_reload, RefreshConfig, RefreshReport};
pub use session::{EditOutcome, EditSession};
pub use vocabulary::Vocabulary;
