//! Error types for the sort engine and configuration loading

use thiserror::Error;

/// Errors raised while sorting a table
///
/// None of these are fatal to the page: the binding layer logs them and
/// leaves the table in its previous order.
#[derive(Debug, Error, PartialEq)]
pub enum SortError {
    #[error("table `{0}` was never registered")]
    UnknownTable(String),

    #[error("column `{column}` is not sortable in table `{table}`")]
    UnknownColumn { table: String, column: String },

    #[error("host rejected the operation: {0}")]
    Host(String),
}

/// Returned when a `data-type` attribute names no known column type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown column type `{0}`")]
pub struct UnknownColumnType(pub String);

/// Errors raised while reading the page configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}
