//! Locale display formatting for date and numeric cells

use dashtable_core::format::{date_cell_text, format_numeric_cell};
use dashtable_core::DisplayConfig;
use web_sys::Document;

use crate::page::select_all_in;

/// Rewrite `.date-cell[data-date]` text from the raw date; returns cells changed
pub fn format_date_cells(document: &Document, display: &DisplayConfig) -> usize {
    let mut changed = 0;
    for cell in select_all_in(document, ".date-cell[data-date]") {
        let raw = cell.get_attribute("data-date");
        if let Some(text) = date_cell_text(raw.as_deref(), display) {
            cell.set_text_content(Some(&text));
            changed += 1;
        }
    }
    changed
}

/// Group digits in `td.numeric` cells, keeping any currency prefix
pub fn format_numeric_cells(document: &Document, display: &DisplayConfig) -> usize {
    let mut changed = 0;
    for cell in select_all_in(document, "td.numeric") {
        let text = cell.text_content().unwrap_or_default();
        if let Some(formatted) = format_numeric_cell(&text, display) {
            if formatted != text.trim() {
                cell.set_text_content(Some(&formatted));
                changed += 1;
            }
        }
    }
    changed
}
