//! Cataloguer - MTG collection maintenance from the command line
//!
//! Edits collection files with derived-field recomputation, merges precon
//! decklists, exports CSV for the common deck sites and refreshes the
//! reference data from Scryfall and MTGJSON.

use cataloguer::decks::{deck_path, load_deck_rows};
use cataloguer::duplicates::DuplicateDecision;
use cataloguer::persistence::write_inventory;
use cataloguer::{
    export_sorted, format_deck_list, format_inventory_table, import_deck_file, load_inventory,
    refresh_all, save_inventory, CatalogError, Column, DeckCatalog, EditOutcome, EditSession,
    Platform, RefreshConfig, Result, Settings, Vocabulary,
};
use clap::{Parser, Subcommand};
use mtg_common::ReferenceIndex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// MTG collection cataloguer
#[derive(Parser, Debug)]
#[command(name = "cataloguer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the downloaded reference data (default: from settings)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a collection as a table
    Show {
        /// Collection name (e.g. "Blue") or file path
        file: String,
    },
    /// Sort a collection canonically and save it
    Sort { file: String },
    /// Edit one cell, recomputing derived fields
    Edit {
        file: String,
        #[arg(long)]
        row: usize,
        /// Column label ("Quantity") or key ("quantity")
        #[arg(long)]
        column: String,
        #[arg(long)]
        value: String,
        /// What to do when the edit duplicates another row: redirect, keep-both or cancel
        #[arg(long, default_value = "cancel")]
        on_duplicate: DuplicateDecision,
    },
    /// Append a row, optionally filling its identity and quantity
    AddRow {
        file: String,
        #[arg(long)]
        lang: Option<String>,
        #[arg(long)]
        set: Option<String>,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long, default_value = "cancel")]
        on_duplicate: DuplicateDecision,
    },
    /// Delete a row
    DeleteRow {
        file: String,
        #[arg(long)]
        row: usize,
    },
    /// Merge a precon deck into a collection
    ImportDeck {
        inventory: String,
        /// Deck file path, deck label ("Elven Empire KHC") or deck file name
        deck: String,
    },
    /// Export a collection as CSV for a deck site
    Export {
        file: String,
        #[arg(long)]
        platform: String,
        #[arg(long)]
        output: PathBuf,
    },
    /// List the supported export platforms
    Platforms,
    /// List precon decks
    Decks {
        #[arg(long)]
        search: Option<String>,
    },
    /// Download newer reference data
    Refresh {
        /// Download even if the local files are up to date
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logger. Set RUST_LOG environment variable to control log level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut settings = Settings::load();
    if let Some(data_dir) = args.data_dir {
        settings.data_dir = data_dir;
    }
    log::debug!("Data directory: {}", settings.data_dir.display());

    if let Err(e) = run(args.command, &mut settings).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands, settings: &mut Settings) -> Result<()> {
    match command {
        Commands::Show { file } => {
            let rows = load_inventory(&settings.resolve_collection(&file))?;
            print!("{}", format_inventory_table(&rows));
        }
        Commands::Sort { file } => {
            let path = settings.resolve_collection(&file);
            let mut rows = load_inventory(&path)?;
            save_inventory(&path, &mut rows)?;
        }
        Commands::Edit {
            file,
            row,
            column,
            value,
            on_duplicate,
        } => {
            let path = settings.resolve_collection(&file);
            let column = Column::parse(&column).ok_or(CatalogError::UnknownColumn(column))?;
            let mut session = open_session(settings, &path)?;
            let outcome = session.edit_cell(row, column, &value, |_| on_duplicate)?;
            report_outcome(row, outcome);
            if outcome == EditOutcome::Committed {
                write_inventory(&path, session.rows())?;
            }
        }
        Commands::AddRow {
            file,
            lang,
            set,
            number,
            quantity,
            on_duplicate,
        } => {
            let path = settings.resolve_collection(&file);
            let mut session = open_session(settings, &path)?;
            let row = session.add_row();
            let cells: Vec<(Column, &str)> = [
                (Column::Quantity, &quantity),
                (Column::Language, &lang),
                (Column::Set, &set),
                (Column::CollectorNumber, &number),
            ]
            .into_iter()
            .filter_map(|(column, value)| value.as_deref().map(|v| (column, v)))
            .collect();
            let outcome = session.fill_row(row, &cells, |_| on_duplicate)?;
            if matches!(outcome, EditOutcome::Redirected(_) | EditOutcome::Cancelled) {
                report_outcome(row, outcome);
                return Ok(());
            }
            write_inventory(&path, session.rows())?;
            println!("Added row {}", row);
        }
        Commands::DeleteRow { file, row } => {
            let path = settings.resolve_collection(&file);
            let mut session = open_session(settings, &path)?;
            let removed = session.delete_row(row)?;
            write_inventory(&path, session.rows())?;
            println!(
                "Deleted row {}: {} ({} {})",
                row, removed.name, removed.set_code, removed.collector_number
            );
        }
        Commands::ImportDeck { inventory, deck } => {
            let path = settings.resolve_collection(&inventory);
            let deck_file = resolve_deck(settings, &deck)?;
            let index = ReferenceIndex::load(&settings.all_cards_path());
            let deck_rows = load_deck_rows(&deck_file)?;
            let report = import_deck_file(&path, deck_rows, &index)?;
            println!(
                "Merged {} rows, appended {} rows",
                report.merged, report.appended
            );
        }
        Commands::Export {
            file,
            platform,
            output,
        } => {
            let rows = load_inventory(&settings.resolve_collection(&file))?;
            let platform = export_sorted(&output, &platform, &rows)?;
            println!("Exported {} rows for {} to {}", rows.len(), platform, output.display());
        }
        Commands::Platforms => {
            for platform in Platform::ALL {
                println!("{}", platform);
            }
        }
        Commands::Decks { search } => {
            let catalog = DeckCatalog::load(&settings.deck_list_path());
            let decks = catalog.search(search.as_deref().unwrap_or(""));
            print!("{}", format_deck_list(&decks));
        }
        Commands::Refresh { force } => {
            let mut config = RefreshConfig::from_settings(settings);
            config.force |= force;
            let report = refresh_all(&config).await?;
            println!(
                "sets: {}, cards: {}, deck list: {}, deck files: {}",
                updated(report.sets),
                updated(report.all_cards),
                updated(report.deck_list),
                updated(report.deck_files)
            );
            if settings.first_startup {
                settings.first_startup = false;
                settings.save()?;
            }
        }
    }
    Ok(())
}

fn open_session(settings: &Settings, path: &Path) -> Result<EditSession> {
    let rows = load_inventory(path)?;
    let index = ReferenceIndex::load(&settings.all_cards_path());
    let vocabulary = Vocabulary::load(&settings.sets_path());
    Ok(EditSession::new(rows, Arc::new(index), vocabulary))
}

/// An existing file is used as is; anything else is looked up in the deck list
fn resolve_deck(settings: &Settings, deck: &str) -> Result<PathBuf> {
    let path = PathBuf::from(deck);
    if path.is_file() {
        return Ok(path);
    }
    let catalog = DeckCatalog::load(&settings.deck_list_path());
    let summary = catalog.find(deck)?;
    Ok(deck_path(&settings.deck_files_dir(), summary))
}

fn report_outcome(row: usize, outcome: EditOutcome) {
    match outcome {
        EditOutcome::Committed => println!("Row {} updated", row),
        EditOutcome::Unchanged => println!("Row {} unchanged", row),
        EditOutcome::Cancelled => println!("Edit cancelled: the card already exists"),
        EditOutcome::Redirected(existing) => {
            println!("Edit not applied: the card already exists at row {}", existing)
        }
    }
}

fn updated(flag: bool) -> &'static str {
    if flag {
        "updated"
    } else {
        "not updated"
    }
}
