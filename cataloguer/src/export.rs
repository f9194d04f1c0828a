//! CSV export for third-party collection platforms

use crate::columns::{Column, DeckSlot};
use crate::error::{CatalogError, Result};
use crate::models::InventoryRow;
use crate::ordering::sort_rows;
use std::io::Write;
use std::path::Path;

/// Platforms with a known CSV layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Moxfield,
    Archidekt,
    CardSphere,
    DeckBox,
    DeckedBuilder,
    DeckStats,
    Helvault,
    ManaBox,
    TappedOut,
    DragonShield,
    TopDecked,
    MtgGoldfish,
    CardKingdom,
    TcgPlayer,
}

/// Columns written for a platform and the header text for each
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub headers: &'static [&'static str],
    pub columns: &'static [Column],
}

const DECK_TYPE: Column = Column::DeckType(DeckSlot::One);
const DECK_QUANTITY: Column = Column::DeckQuantity(DeckSlot::One);
const DECK_TYPE_2: Column = Column::DeckType(DeckSlot::Two);
const DECK_QUANTITY_2: Column = Column::DeckQuantity(DeckSlot::Two);

impl Platform {
    pub const ALL: [Platform; 14] = [
        Platform::Moxfield,
        Platform::Archidekt,
        Platform::CardSphere,
        Platform::DeckBox,
        Platform::DeckedBuilder,
        Platform::DeckStats,
        Platform::Helvault,
        Platform::ManaBox,
        Platform::TappedOut,
        Platform::DragonShield,
        Platform::TopDecked,
        Platform::MtgGoldfish,
        Platform::CardKingdom,
        Platform::TcgPlayer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Platform::Moxfield => "Moxfield",
            Platform::Archidekt => "Archidekt",
            Platform::CardSphere => "CardSphere",
            Platform::DeckBox => "DeckBox",
            Platform::DeckedBuilder => "Decked Builder",
            Platform::DeckStats => "DeckStats",
            Platform::Helvault => "Helvault",
            Platform::ManaBox => "ManaBox",
            Platform::TappedOut => "TappedOut",
            Platform::DragonShield => "DragonShield",
            Platform::TopDecked => "TopDecked",
            Platform::MtgGoldfish => "MTGGoldfish",
            Platform::CardKingdom => "CardKingdom",
            Platform::TcgPlayer => "TCGPlayer",
        }
    }

    /// Looks up a platform by name, ignoring case
    pub fn from_name(name: &str) -> Result<Self> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::UnknownPlatform(name.to_string()))
    }

    pub fn layout(self) -> Layout {
        use Column::*;
        match self {
            Platform::Moxfield => Layout {
                headers: &["Count", "Name", "Edition", "Collector Number"],
                columns: &[Quantity, Name, Set, CollectorNumber],
            },
            Platform::Archidekt => Layout {
                headers: &["Name", "Quantity", "Set", "Collector Number"],
                columns: &[Name, Quantity, Set, CollectorNumber],
            },
            Platform::CardSphere => Layout {
                headers: &["Quantity", "Name", "Set", "USD", "Quantity Foil", "USD Foil"],
                columns: &[Quantity, Name, Set, Usd, QuantityFoil, UsdFoil],
            },
            Platform::DeckBox => Layout {
                headers: &["Quantity", "Name", "Set", "Collector Number", "Storage Areas"],
                columns: &[Quantity, Name, Set, CollectorNumber, StorageAreas],
            },
            Platform::DeckedBuilder => Layout {
                headers: &[
                    "Name",
                    "Quantity",
                    "Set",
                    "Collector Number",
                    "USD",
                    "Quantity Foil",
                    "Total USD",
                    "Total USD Foil",
                ],
                columns: &[
                    Name,
                    Quantity,
                    Set,
                    CollectorNumber,
                    Usd,
                    QuantityFoil,
                    TotalUsd,
                    TotalUsdFoil,
                ],
            },
            Platform::DeckStats => Layout {
                headers: &["Quantity", "Name", "Set", "Collector Number", "Deck Type", "Deck Quantity"],
                columns: &[Quantity, Name, Set, CollectorNumber, DECK_TYPE, DECK_QUANTITY],
            },
            Platform::Helvault => Layout {
                headers: &[
                    "Name",
                    "Quantity",
                    "Set",
                    "Collector Number",
                    "Deck Type",
                    "Deck Quantity",
                    "Deck Type 2",
                    "Deck Quantity 2",
                ],
                columns: &[
                    Name,
                    Quantity,
                    Set,
                    CollectorNumber,
                    DECK_TYPE,
                    DECK_QUANTITY,
                    DECK_TYPE_2,
                    DECK_QUANTITY_2,
                ],
            },
            Platform::ManaBox => Layout {
                headers: &["Quantity", "Name", "Set", "Collector Number", "Color Identity"],
                columns: &[Quantity, Name, Set, CollectorNumber, ColorIdentity],
            },
            Platform::TappedOut => Layout {
                headers: &["Name", "Quantity", "Set", "Collector Number", "Deck Type", "Deck Quantity"],
                columns: &[Name, Quantity, Set, CollectorNumber, DECK_TYPE, DECK_QUANTITY],
            },
            Platform::DragonShield => Layout {
                headers: &["Name", "Quantity", "Set", "Collector Number", "Deck Type", "Storage Areas"],
                columns: &[Name, Quantity, Set, CollectorNumber, DECK_TYPE, StorageAreas],
            },
            Platform::TopDecked => Layout {
                headers: &[
                    "Quantity",
                    "Name",
                    "Set",
                    "Collector Number",
                    "Deck Type",
                    "Deck Quantity",
                    "Storage Areas",
                ],
                columns: &[
                    Quantity,
                    Name,
                    Set,
                    CollectorNumber,
                    DECK_TYPE,
                    DECK_QUANTITY,
                    StorageAreas,
                ],
            },
            Platform::MtgGoldfish => Layout {
                headers: &["Quantity", "Name", "Set", "Collector Number", "USD", "Total USD"],
                columns: &[Quantity, Name, Set, CollectorNumber, Usd, TotalUsd],
            },
            Platform::CardKingdom => Layout {
                headers: &["Name", "Quantity", "Set", "Collector Number", "USD"],
                columns: &[Name, Quantity, Set, CollectorNumber, Usd],
            },
            Platform::TcgPlayer => Layout {
                headers: &[
                    "Name",
                    "Quantity",
                    "Set",
                    "Collector Number",
                    "USD",
                    "USD Foil",
                    "Total USD",
                    "Total USD Foil",
                ],
                columns: &[
                    Name,
                    Quantity,
                    Set,
                    CollectorNumber,
                    Usd,
                    UsdFoil,
                    TotalUsd,
                    TotalUsdFoil,
                ],
            },
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Writes one header line and one line per row in the platform's layout
pub fn write_csv<W: Write>(writer: W, platform: Platform, rows: &[InventoryRow]) -> Result<()> {
    let layout = platform.layout();
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(layout.headers)?;
    for row in rows {
        wtr.write_record(layout.columns.iter().map(|&column| row.get(column)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports rows to a CSV file for the named platform
pub fn export_csv(path: &Path, platform_name: &str, rows: &[InventoryRow]) -> Result<Platform> {
    let platform = Platform::from_name(platform_name)?;
    let file = std::fs::File::create(path)?;
    write_csv(file, platform, rows)?;
    log::info!(
        "Exported {} rows for {} to {}",
        rows.len(),
        platform,
        path.display()
    );
    Ok(platform)
}

/// Exports a canonically sorted copy of the rows. Nothing is written if the
/// rows cannot be sorted.
pub fn export_sorted(path: &Path, platform_name: &str, rows: &[InventoryRow]) -> Result<Platform> {
    let platform = Platform::from_name(platform_name)?;
    let mut sorted = rows.to_vec();
    sort_rows(&mut sorted)?;
    export_csv(path, platform.name(), &sorted)
}
