//! `SortableTable` over a live `<table>` element
//!
//! Headers are `th.sortable-header[data-column]` with an optional
//! `data-type`; cells carry the same `data-column` key. Rows are the direct
//! `tr` children of the first `tbody` and are reordered by re-appending them.

use dashtable_core::{ColumnDescriptor, ColumnType, SortError, SortOrder, SortableTable};
use web_sys::Element;

use crate::page::{select_all, select_one};

pub const HEADER_SELECTOR: &str = "th.sortable-header[data-column]";

pub struct DomTable {
    table: Element,
    body: Element,
    rows: Vec<Element>,
}

impl DomTable {
    /// Snapshot the table's body rows; `None` when there is no `tbody`
    pub fn new(table: Element) -> Option<Self> {
        let body = select_one(&table, "tbody")?;
        let rows = select_all(&body, ":scope > tr");
        Some(Self { table, body, rows })
    }

    pub fn headers(&self) -> Vec<Element> {
        select_all(&self.table, HEADER_SELECTOR)
    }

    fn header(&self, key: &str) -> Option<Element> {
        self.headers()
            .into_iter()
            .find(|h| h.get_attribute("data-column").as_deref() == Some(key))
    }
}

impl SortableTable for DomTable {
    fn header_columns(&self) -> Vec<ColumnDescriptor> {
        self.headers()
            .iter()
            .filter_map(|h| {
                let key = h.get_attribute("data-column")?;
                let kind = ColumnType::from_attribute(h.get_attribute("data-type").as_deref());
                Some(ColumnDescriptor::new(key, kind))
            })
            .collect()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell_text(&self, row: usize, key: &str) -> Option<String> {
        let row = self.rows.get(row)?;
        select_all(row, "[data-column]")
            .into_iter()
            .find(|cell| cell.get_attribute("data-column").as_deref() == Some(key))
            .and_then(|cell| cell.text_content())
    }

    fn apply_order(&mut self, order: &[usize]) -> Result<(), SortError> {
        if order.len() != self.rows.len() {
            return Err(SortError::Host(format!(
                "order has {} entries for {} rows",
                order.len(),
                self.rows.len()
            )));
        }
        let mut reordered = Vec::with_capacity(order.len());
        for &idx in order {
            let row = self
                .rows
                .get(idx)
                .ok_or_else(|| SortError::Host(format!("row {} out of range", idx)))?;
            self.body
                .append_child(row)
                .map_err(|e| SortError::Host(format!("append_child failed: {:?}", e)))?;
            reordered.push(row.clone());
        }
        self.rows = reordered;
        Ok(())
    }

    fn set_indicator(&mut self, key: &str, order: Option<SortOrder>) {
        let Some(header) = self.header(key) else {
            return;
        };
        let classes = header.class_list();
        let _ = classes.remove_2(
            SortOrder::Ascending.css_class(),
            SortOrder::Descending.css_class(),
        );
        if let Some(order) = order {
            let _ = classes.add_1(order.css_class());
        }
    }
}
