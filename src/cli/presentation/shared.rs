//! Shared presentation helpers.

use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Two-column key/value table.
pub fn key_value_table(rows: &[(&str, String)]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    for (key, value) in rows {
        table.add_row(vec![key.to_string(), value.clone()]);
    }
    table
}

/// "Needs review" block listing failure markers; empty when nothing failed.
pub fn format_failed_sections(markers: &[String]) -> String {
    if markers.is_empty() {
        return String::new();
    }
    let mut out = format!("{}\n", "Needs review:".yellow().bold());
    for marker in markers {
        out.push_str(&format!("  - {}\n", marker.yellow()));
    }
    out
}

pub fn to_pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
