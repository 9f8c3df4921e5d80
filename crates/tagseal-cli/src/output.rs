//! Output formatting for item listings and rekey reports.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use tagseal_core::{Item, ItemErrorKind, ItemStatus, LoadReport, PasswordChange};

/// Short label for an item's load status.
pub fn status_label(status: Option<ItemStatus>) -> &'static str {
    match status {
        Some(ItemStatus::Decrypted) => "decrypted",
        Some(ItemStatus::Plaintext) | None => "plaintext",
        Some(ItemStatus::Failed(ItemErrorKind::MalformedToken)) => "malformed",
        Some(ItemStatus::Failed(_)) => "undecryptable",
    }
}

pub fn items_json(items: &[Item], report: &LoadReport) -> Vec<serde_json::Value> {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            serde_json::json!({
                "index": position + 1,
                "status": status_label(report.status(item.id)),
                "text": item.display_text,
                "value": item.token,
                "selected": item.selected,
            })
        })
        .collect()
}

pub fn items_table(items: &[Item], report: &LoadReport) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "STATUS", "SELECTED", "TEXT"]);
    for (position, item) in items.iter().enumerate() {
        table.add_row(vec![
            (position + 1).to_string(),
            status_label(report.status(item.id)).to_string(),
            if item.selected { "yes" } else { "no" }.to_string(),
            item.display_text.clone(),
        ]);
    }
    table.to_string()
}

/// One line per item that failed in a rekey pass, keyed by 1-based index.
pub fn rekey_failures(items: &[Item], change: &PasswordChange) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .filter_map(|(position, item)| {
            change
                .report
                .failures
                .iter()
                .find(|failure| failure.item_id == item.id)
                .map(|failure| format!("- item {}: {}", position + 1, failure.kind))
        })
        .collect()
}
