//! Sortable tables - shared between the browser binding and native hosts
//!
//! Features: typed value extraction, stable toggling sort, per-table state

mod types;
mod extract;
mod platform;
mod memory;
mod engine;

pub use types::{ColumnDescriptor, ColumnType, SortOrder, SortState, TableId};
pub use extract::{parse_date, parse_number, SortKey, TextCollation, DATE_SENTINEL};
pub use platform::SortableTable;
pub use memory::{MemoryRow, MemoryTable};
pub use engine::{sorted_order, SortEngine};
