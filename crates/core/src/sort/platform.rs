//! Host trait for sortable tables
//!
//! The engine never touches the DOM directly. The browser binding and the
//! in-memory table used in tests both implement [`SortableTable`].

use super::types::{ColumnDescriptor, SortOrder};
use crate::error::SortError;

/// A table whose rows the engine can read and reorder
pub trait SortableTable {
    /// Columns declared by the table's sortable headers
    fn header_columns(&self) -> Vec<ColumnDescriptor>;

    /// Number of body rows
    fn row_count(&self) -> usize;

    /// Raw display text of the cell for `key` in `row`, if the row has one
    fn cell_text(&self, row: usize, key: &str) -> Option<String>;

    /// Reposition rows so that new position `i` holds the row previously at
    /// `order[i]`. `order` is always a permutation of `0..row_count()`.
    fn apply_order(&mut self, order: &[usize]) -> Result<(), SortError>;

    /// Show or clear the sort marker on the header of `key`
    fn set_indicator(&mut self, key: &str, order: Option<SortOrder>);

    /// Whether any sortable header declares `key`
    fn declares_column(&self, key: &str) -> bool {
        self.header_columns().iter().any(|c| c.key == key)
    }
}
