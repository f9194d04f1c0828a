//! Collection table columns
//!
//! Each column has a display label (shown in the grid and used in CSV
//! headers) and a storage key (the JSON field name in collection files).

/// Every column of a collection table, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Language,
    ReleaseDate,
    Name,
    TypeLine,
    ColorIdentity,
    SetName,
    Set,
    CollectorNumber,
    Quantity,
    QuantityFoil,
    Usd,
    UsdFoil,
    TotalUsd,
    TotalUsdFoil,
    StorageAreas,
    StorageQuantity,
    DeckType(DeckSlot),
    DeckQuantity(DeckSlot),
}

/// One of the four deck allocations a row can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckSlot {
    One,
    Two,
    Three,
    Four,
}

impl DeckSlot {
    pub const ALL: [DeckSlot; 4] = [DeckSlot::One, DeckSlot::Two, DeckSlot::Three, DeckSlot::Four];

    /// Zero-based position of the slot
    pub fn index(self) -> usize {
        match self {
            DeckSlot::One => 0,
            DeckSlot::Two => 1,
            DeckSlot::Three => 2,
            DeckSlot::Four => 3,
        }
    }
}

impl Column {
    pub const ALL: [Column; 24] = [
        Column::Language,
        Column::ReleaseDate,
        Column::Name,
        Column::TypeLine,
        Column::ColorIdentity,
        Column::SetName,
        Column::Set,
        Column::CollectorNumber,
        Column::Quantity,
        Column::QuantityFoil,
        Column::Usd,
        Column::UsdFoil,
        Column::TotalUsd,
        Column::TotalUsdFoil,
        Column::StorageAreas,
        Column::StorageQuantity,
        Column::DeckType(DeckSlot::One),
        Column::DeckQuantity(DeckSlot::One),
        Column::DeckType(DeckSlot::Two),
        Column::DeckQuantity(DeckSlot::Two),
        Column::DeckType(DeckSlot::Three),
        Column::DeckQuantity(DeckSlot::Three),
        Column::DeckType(DeckSlot::Four),
        Column::DeckQuantity(DeckSlot::Four),
    ];

    /// Human-readable label (e.g. "Collector Number")
    pub fn label(self) -> &'static str {
        match self {
            Column::Language => "Language",
            Column::ReleaseDate => "Release Date",
            Column::Name => "Name",
            Column::TypeLine => "Type",
            Column::ColorIdentity => "Color Identity",
            Column::SetName => "Set Name",
            Column::Set => "Set",
            Column::CollectorNumber => "Collector Number",
            Column::Quantity => "Quantity",
            Column::QuantityFoil => "Quantity Foil",
            Column::Usd => "USD",
            Column::UsdFoil => "USD Foil",
            Column::TotalUsd => "Total USD",
            Column::TotalUsdFoil => "Total USD Foil",
            Column::StorageAreas => "Storage Areas",
            Column::StorageQuantity => "Storage Quantity",
            Column::DeckType(DeckSlot::One) => "Deck Type",
            Column::DeckType(DeckSlot::Two) => "Deck Type 2",
            Column::DeckType(DeckSlot::Three) => "Deck Type 3",
            Column::DeckType(DeckSlot::Four) => "Deck Type 4",
            Column::DeckQuantity(DeckSlot::One) => "Deck Quantity",
            Column::DeckQuantity(DeckSlot::Two) => "Deck Quantity 2",
            Column::DeckQuantity(DeckSlot::Three) => "Deck Quantity 3",
            Column::DeckQuantity(DeckSlot::Four) => "Deck Quantity 4",
        }
    }

    /// JSON field name in collection files (e.g. "collector_number")
    pub fn key(self) -> &'static str {
        match self {
            Column::Language => "lang",
            Column::ReleaseDate => "release_date",
            Column::Name => "name",
            Column::TypeLine => "type_line",
            Column::ColorIdentity => "color_identity",
            Column::SetName => "set_name",
            Column::Set => "set",
            Column::CollectorNumber => "collector_number",
            Column::Quantity => "quantity",
            Column::QuantityFoil => "quantity_foil",
            Column::Usd => "usd",
            Column::UsdFoil => "usd_foil",
            Column::TotalUsd => "total_usd",
            Column::TotalUsdFoil => "total_usd_foil",
            Column::StorageAreas => "storage_areas",
            Column::StorageQuantity => "storage_quantity",
            Column::DeckType(DeckSlot::One) => "deck_type",
            Column::DeckType(DeckSlot::Two) => "deck_type_two",
            Column::DeckType(DeckSlot::Three) => "deck_type_three",
            Column::DeckType(DeckSlot::Four) => "deck_type_four",
            Column::DeckQuantity(DeckSlot::One) => "deck_quantity",
            Column::DeckQuantity(DeckSlot::Two) => "deck_quantity_two",
            Column::DeckQuantity(DeckSlot::Three) => "deck_quantity_three",
            Column::DeckQuantity(DeckSlot::Four) => "deck_quantity_four",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Accepts either a display label or a storage key, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s) || c.key().eq_ignore_ascii_case(s))
    }

    /// Whether the user may type into this column. Everything else is derived
    /// or filled from the reference data.
    pub fn is_editable(self) -> bool {
        matches!(
            self,
            Column::Language
                | Column::Set
                | Column::CollectorNumber
                | Column::Quantity
                | Column::QuantityFoil
                | Column::Usd
                | Column::UsdFoil
                | Column::StorageAreas
                | Column::DeckType(_)
                | Column::DeckQuantity(_)
        )
    }

    /// Part of the identity triple
    pub fn is_identity(self) -> bool {
        matches!(self, Column::Language | Column::Set | Column::CollectorNumber)
    }

    /// Input to the storage quantity
    pub fn affects_storage(self) -> bool {
        matches!(self, Column::Quantity | Column::DeckQuantity(_))
    }

    /// Input to the total prices
    pub fn affects_totals(self) -> bool {
        matches!(
            self,
            Column::Quantity | Column::QuantityFoil | Column::Usd | Column::UsdFoil
        )
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
