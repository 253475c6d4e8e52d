//! In-memory table for hosts without a DOM

use std::collections::HashMap;

use super::platform::SortableTable;
use super::types::{ColumnDescriptor, SortOrder};
use crate::error::SortError;

/// A row with a stable identity and its cells keyed by column
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRow {
    pub id: usize,
    pub cells: HashMap<String, String>,
}

impl MemoryRow {
    pub fn new<K, V>(id: usize, cells: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id,
            cells: cells.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<MemoryRow>,
    indicators: HashMap<String, SortOrder>,
}

impl MemoryTable {
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<MemoryRow>) -> Self {
        Self {
            columns,
            rows,
            indicators: HashMap::new(),
        }
    }

    pub fn rows(&self) -> &[MemoryRow] {
        &self.rows
    }

    /// Row identities in current order
    pub fn row_ids(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.id).collect()
    }

    /// Values of one column in current row order (empty for missing cells)
    pub fn column_values(&self, key: &str) -> Vec<&str> {
        self.rows
            .iter()
            .map(|r| r.cells.get(key).map(String::as_str).unwrap_or(""))
            .collect()
    }

    pub fn indicator(&self, key: &str) -> Option<SortOrder> {
        self.indicators.get(key).copied()
    }

    /// Number of headers currently showing a marker
    pub fn active_indicators(&self) -> usize {
        self.indicators.len()
    }
}

impl SortableTable for MemoryTable {
    fn header_columns(&self) -> Vec<ColumnDescriptor> {
        self.columns.clone()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell_text(&self, row: usize, key: &str) -> Option<String> {
        self.rows.get(row)?.cells.get(key).cloned()
    }

    fn apply_order(&mut self, order: &[usize]) -> Result<(), SortError> {
        if order.len() != self.rows.len() {
            return Err(SortError::Host(format!(
                "order has {} entries for {} rows",
                order.len(),
                self.rows.len()
            )));
        }
        let mut slots: Vec<Option<MemoryRow>> = self.rows.drain(..).map(Some).collect();
        let mut reordered = Vec::with_capacity(order.len());
        for &idx in order {
            match slots.get_mut(idx).and_then(Option::take) {
                Some(row) => reordered.push(row),
                None => {
                    // Put back what we have so the table is never left short
                    reordered.extend(slots.into_iter().flatten());
                    self.rows = reordered;
                    return Err(SortError::Host(format!("row {} is out of range or repeated", idx)));
                }
            }
        }
        self.rows = reordered;
        Ok(())
    }

    fn set_indicator(&mut self, key: &str, order: Option<SortOrder>) {
        match order {
            Some(order) => {
                self.indicators.insert(key.to_string(), order);
            }
            None => {
                self.indicators.remove(key);
            }
        }
    }
}
