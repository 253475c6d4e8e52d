//! Type definitions for sortable tables

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownColumnType;

/// Declared value type of a sortable column (`data-type` on the header)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
}

impl FromStr for ColumnType {
    type Err = UnknownColumnType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "string" | "" => Ok(ColumnType::Text),
            "number" | "numeric" | "currency" => Ok(ColumnType::Number),
            "date" | "datetime" => Ok(ColumnType::Date),
            _ => Err(UnknownColumnType(s.to_string())),
        }
    }
}

impl ColumnType {
    /// Parse a header attribute, falling back to text for unknown values
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            None => ColumnType::Text,
            Some(raw) => raw.parse().unwrap_or_else(|e: UnknownColumnType| {
                tracing::warn!("{}, sorting as text", e);
                ColumnType::Text
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggle(&self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// CSS class marking a header sorted in this order
    pub fn css_class(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "sort-asc",
            SortOrder::Descending => "sort-desc",
        }
    }
}

/// A sortable column as declared by its header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub key: String,
    #[serde(rename = "type", default)]
    pub kind: ColumnType,
}

impl ColumnDescriptor {
    pub fn new(key: impl Into<String>, kind: ColumnType) -> Self {
        Self { key: key.into(), kind }
    }
}

/// Current sort of one table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub active_column: Option<String>,
    pub order: SortOrder,
}

impl SortState {
    /// State after activating `column`: same column flips the order,
    /// a different column starts ascending
    pub fn activate(&self, column: &str) -> SortState {
        if self.active_column.as_deref() == Some(column) {
            SortState {
                active_column: self.active_column.clone(),
                order: self.order.toggle(),
            }
        } else {
            SortState {
                active_column: Some(column.to_string()),
                order: SortOrder::Ascending,
            }
        }
    }

    /// Indicator to show on the header of `column`, if any
    pub fn indicator_for(&self, column: &str) -> Option<SortOrder> {
        (self.active_column.as_deref() == Some(column)).then_some(self.order)
    }
}

/// Identity of a table on the page (its `id` attribute)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableId(pub String);

impl TableId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TableId {
    fn from(value: &str) -> Self {
        TableId(value.to_string())
    }
}

impl From<String> for TableId {
    fn from(value: String) -> Self {
        TableId(value)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
