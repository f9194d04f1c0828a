use crate::decks::DeckSummary;
use crate::derivation::{format_total, parse_price, parse_quantity};
use crate::models::InventoryRow;

fn width(text: &str) -> usize {
    text.chars().count()
}

/// Stored totals keep their sign; over-allocated foils produce negative ones
fn signed_total(text: &str) -> f64 {
    let value = parse_price(text);
    if text.trim_start().starts_with('-') {
        -value
    } else {
        value
    }
}

/// Aligned table of collection rows with a quantity and value summary
pub fn format_inventory_table(rows: &[InventoryRow]) -> String {
    if rows.is_empty() {
        return "Collection is empty.\n".to_string();
    }

    let mut max_row_len = 1; // "#"
    let mut max_lang_len = 4; // "Lang"
    let mut max_set_len = 3;
    let mut max_cn_len = 2;
    let mut max_name_len = 4;
    let mut max_qty_len = 3;
    let mut max_foil_len = 4;
    let mut max_storage_len = 7;
    let mut max_total_len = 9;
    let mut max_total_foil_len = 10;

    // Calculate maximum lengths for alignment
    for (i, row) in rows.iter().enumerate() {
        max_row_len = max_row_len.max(width(&i.to_string()));
        max_lang_len = max_lang_len.max(width(&row.language));
        max_set_len = max_set_len.max(width(&row.set_code));
        max_cn_len = max_cn_len.max(width(&row.collector_number));
        max_name_len = max_name_len.max(width(&row.name));
        max_qty_len = max_qty_len.max(width(&row.quantity));
        max_foil_len = max_foil_len.max(width(&row.quantity_foil));
        max_storage_len = max_storage_len.max(width(&row.storage_quantity));
        max_total_len = max_total_len.max(width(&row.total_usd));
        max_total_foil_len = max_total_foil_len.max(width(&row.total_usd_foil));
    }

    let line = |cells: [&str; 10]| {
        format!(
            "{:>w0$} | {:<w1$} | {:<w2$} | {:<w3$} | {:<w4$} | {:>w5$} | {:>w6$} | {:>w7$} | {:>w8$} | {:>w9$}\n",
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            cells[4],
            cells[5],
            cells[6],
            cells[7],
            cells[8],
            cells[9],
            w0 = max_row_len,
            w1 = max_lang_len,
            w2 = max_set_len,
            w3 = max_cn_len,
            w4 = max_name_len,
            w5 = max_qty_len,
            w6 = max_foil_len,
            w7 = max_storage_len,
            w8 = max_total_len,
            w9 = max_total_foil_len,
        )
    };

    let separator = [
        max_row_len,
        max_lang_len,
        max_set_len,
        max_cn_len,
        max_name_len,
        max_qty_len,
        max_foil_len,
        max_storage_len,
        max_total_len,
        max_total_foil_len,
    ]
    .iter()
    .map(|w| "-".repeat(*w))
    .collect::<Vec<_>>()
    .join("-+-")
        + "\n";

    let mut output = line([
        "#",
        "Lang",
        "Set",
        "CN",
        "Name",
        "Qty",
        "Foil",
        "Storage",
        "Total USD",
        "Total Foil",
    ]);
    output.push_str(&separator);
    for (i, row) in rows.iter().enumerate() {
        output.push_str(&line([
            &i.to_string(),
            &row.language,
            &row.set_code,
            &row.collector_number,
            &row.name,
            &row.quantity,
            &row.quantity_foil,
            &row.storage_quantity,
            &row.total_usd,
            &row.total_usd_foil,
        ]));
    }

    // Add total cards count and value
    let total_cards: i64 = rows.iter().map(|r| parse_quantity(&r.quantity)).sum();
    let total_value: f64 = rows
        .iter()
        .map(|r| signed_total(&r.total_usd) + signed_total(&r.total_usd_foil))
        .sum();
    output.push_str(&separator);
    output.push_str(&format!("Rows: {}\n", rows.len()));
    output.push_str(&format!("Total cards: {total_cards}\n"));
    let value = format_total(total_value);
    output.push_str(&format!(
        "Total value: ${}\n",
        if value.is_empty() { "0.00" } else { &value }
    ));

    output
}

/// One "name code" label per line, with the deck file name
pub fn format_deck_list(decks: &[&DeckSummary]) -> String {
    if decks.is_empty() {
        return "No decks found.\n".to_string();
    }

    let labels: Vec<String> = decks.iter().map(|deck| deck.label()).collect();
    let max_label_len = labels.iter().map(|l| width(l)).max().unwrap_or(0);

    let mut output = String::new();
    for (label, deck) in labels.iter().zip(decks) {
        output.push_str(&format!(
            "{:<width$}  {}\n",
            label,
            deck.file(),
            width = max_label_len
        ));
    }
    output.push_str(&format!("{} decks\n", decks.len()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(set: &str, cn: &str, name: &str, qty: &str, total: &str) -> InventoryRow {
        InventoryRow {
            language: "en".to_string(),
            set_code: set.to_string(),
            collector_number: cn.to_string(),
            name: name.to_string(),
            quantity: qty.to_string(),
            total_usd: total.to_string(),
            ..InventoryRow::default()
        }
    }

    #[test]
    fn table_is_aligned() {
        let rows = vec![
            row("lea", "161", "Lightning Bolt", "2", "900.00"),
            row("khc", "117", "Forest", "12", "1.20"),
        ];

        let output = format_inventory_table(&rows);
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("# | Lang | Set | CN  | Name           |"));
        assert_eq!(lines[0].len(), lines[1].len());
        assert_eq!(lines[0].len(), lines[2].len());
        assert_eq!(lines[2].len(), lines[3].len());
        assert!(lines[3].contains("Forest        "));
        assert!(output.contains("Rows: 2\n"));
        assert!(output.contains("Total cards: 14\n"));
        assert!(output.contains("Total value: $901.20\n"));
    }

    #[test]
    fn empty_table() {
        assert_eq!(format_inventory_table(&[]), "Collection is empty.\n");
    }

    #[test]
    fn zero_value_is_shown() {
        let output = format_inventory_table(&[row("lea", "1", "Card", "1", "")]);
        assert!(output.contains("Total value: $0.00\n"));
    }

    #[test]
    fn negative_totals_reduce_value() {
        let rows = vec![
            row("khc", "2", "Lathril", "1", "-2.00"),
            row("lea", "161", "Lightning Bolt", "1", "5.00"),
        ];
        let output = format_inventory_table(&rows);
        assert!(output.contains("Total value: $3.00\n"));
    }

    #[test]
    fn deck_list_pads_labels() {
        let short = DeckSummary {
            name: "Elves".to_string(),
            code: "KHC".to_string(),
            file_name: "Elves_KHC".to_string(),
            release_date: None,
            deck_type: None,
        };
        let long = DeckSummary {
            name: "Elven Empire".to_string(),
            file_name: "ElvenEmpire_KHC".to_string(),
            ..short.clone()
        };

        let output = format_deck_list(&[&short, &long]);

        assert_eq!(
            output,
            "Elves KHC         Elves_KHC.json\nElven Empire KHC  ElvenEmpire_KHC.json\n2 decks\n"
        );
    }
}
