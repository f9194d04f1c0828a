use crate::columns::{Column, DeckSlot};
use mtg_common::de::loose_string;
use mtg_common::CardKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One line of a collection file
///
/// Every value is kept as the text shown in the grid; numeric fields are
/// parsed on demand by the derivation functions. Keys this version does not
/// know about are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InventoryRow {
    #[serde(rename = "lang", default, deserialize_with = "loose_string")]
    pub language: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub release_date: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub name: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub type_line: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub color_identity: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub set_name: String,
    #[serde(rename = "set", default, deserialize_with = "loose_string")]
    pub set_code: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub collector_number: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub quantity: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub quantity_foil: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub usd: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub usd_foil: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub total_usd: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub total_usd_foil: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub storage_areas: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub storage_quantity: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub deck_type: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub deck_quantity: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub deck_type_two: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub deck_quantity_two: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub deck_type_three: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub deck_quantity_three: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub deck_type_four: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub deck_quantity_four: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl InventoryRow {
    /// Returns the identity triple of this row
    pub fn key(&self) -> CardKey {
        CardKey::new(&self.language, &self.set_code, &self.collector_number)
    }

    /// Returns the cell text for a column
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Language => &self.language,
            Column::ReleaseDate => &self.release_date,
            Column::Name => &self.name,
            Column::TypeLine => &self.type_line,
            Column::ColorIdentity => &self.color_identity,
            Column::SetName => &self.set_name,
            Column::Set => &self.set_code,
            Column::CollectorNumber => &self.collector_number,
            Column::Quantity => &self.quantity,
            Column::QuantityFoil => &self.quantity_foil,
            Column::Usd => &self.usd,
            Column::UsdFoil => &self.usd_foil,
            Column::TotalUsd => &self.total_usd,
            Column::TotalUsdFoil => &self.total_usd_foil,
            Column::StorageAreas => &self.storage_areas,
            Column::StorageQuantity => &self.storage_quantity,
            Column::DeckType(DeckSlot::One) => &self.deck_type,
            Column::DeckType(DeckSlot::Two) => &self.deck_type_two,
            Column::DeckType(DeckSlot::Three) => &self.deck_type_three,
            Column::DeckType(DeckSlot::Four) => &self.deck_type_four,
            Column::DeckQuantity(DeckSlot::One) => &self.deck_quantity,
            Column::DeckQuantity(DeckSlot::Two) => &self.deck_quantity_two,
            Column::DeckQuantity(DeckSlot::Three) => &self.deck_quantity_three,
            Column::DeckQuantity(DeckSlot::Four) => &self.deck_quantity_four,
        }
    }

    /// Returns the cell for a column for writing
    pub fn get_mut(&mut self, column: Column) -> &mut String {
        match column {
            Column::Language => &mut self.language,
            Column::ReleaseDate => &mut self.release_date,
            Column::Name => &mut self.name,
            Column::TypeLine => &mut self.type_line,
            Column::ColorIdentity => &mut self.color_identity,
            Column::SetName => &mut self.set_name,
            Column::Set => &mut self.set_code,
            Column::CollectorNumber => &mut self.collector_number,
            Column::Quantity => &mut self.quantity,
            Column::QuantityFoil => &mut self.quantity_foil,
            Column::Usd => &mut self.usd,
            Column::UsdFoil => &mut self.usd_foil,
            Column::TotalUsd => &mut self.total_usd,
            Column::TotalUsdFoil => &mut self.total_usd_foil,
            Column::StorageAreas => &mut self.storage_areas,
            Column::StorageQuantity => &mut self.storage_quantity,
            Column::DeckType(DeckSlot::One) => &mut self.deck_type,
            Column::DeckType(DeckSlot::Two) => &mut self.deck_type_two,
            Column::DeckType(DeckSlot::Three) => &mut self.deck_type_three,
            Column::DeckType(DeckSlot::Four) => &mut self.deck_type_four,
            Column::DeckQuantity(DeckSlot::One) => &mut self.deck_quantity,
            Column::DeckQuantity(DeckSlot::Two) => &mut self.deck_quantity_two,
            Column::DeckQuantity(DeckSlot::Three) => &mut self.deck_quantity_three,
            Column::DeckQuantity(DeckSlot::Four) => &mut self.deck_quantity_four,
        }
    }

    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        *self.get_mut(column) = value.into();
    }

    /// Deck quantities in slot order
    pub fn deck_quantities(&self) -> [&str; 4] {
        DeckSlot::ALL.map(|slot| self.get(Column::DeckQuantity(slot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_value_types() {
        let json = r#"{
            "lang": "en",
            "set": "khm",
            "collector_number": "1",
            "quantity": 3,
            "quantity_foil": 0,
            "color_identity": ["W", "U"],
            "usd": null
        }"#;

        let row: InventoryRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.quantity, "3");
        assert_eq!(row.quantity_foil, "0");
        assert_eq!(row.color_identity, "W,U");
        assert_eq!(row.usd, "");
        assert_eq!(row.deck_type_four, "");
    }

    #[test]
    fn unknown_keys_survive_round_trip() {
        let json = r#"{"lang": "en", "set": "khm", "collector_number": "1", "condition": "NM"}"#;

        let row: InventoryRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.extra.get("condition").and_then(|v| v.as_str()), Some("NM"));

        let written = serde_json::to_value(&row).unwrap();
        assert_eq!(written["condition"], "NM");
        assert_eq!(written["set"], "khm");
        assert_eq!(written["storage_quantity"], "");
    }

    #[test]
    fn get_and_set_by_column() {
        let mut row = InventoryRow::default();
        for column in Column::ALL {
            row.set(column, column.key());
        }
        for column in Column::ALL {
            assert_eq!(row.get(column), column.key());
        }
        assert_eq!(row.key(), CardKey::new("lang", "set", "collector_number"));
    }

    #[test]
    fn deck_quantities_in_slot_order() {
        let row = InventoryRow {
            deck_quantity: "1".to_string(),
            deck_quantity_two: "2".to_string(),
            deck_quantity_three: "3".to_string(),
            deck_quantity_four: "4".to_string(),
            ..InventoryRow::default()
        };
        assert_eq!(row.deck_quantities(), ["1", "2", "3", "4"]);
    }
}
