//! Page configuration
//!
//! Pages may embed a JSON object in
//! `<script type="application/json" id="dashtable-config">`. Every field is
//! optional; anything missing keeps its default.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::navigation::RouteMap;
use crate::sort::TextCollation;

/// Id of the script element holding the configuration
pub const CONFIG_ELEMENT_ID: &str = "dashtable-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashtableConfig {
    /// Table ids registered for sorting on page load
    #[serde(default = "default_sortable_tables")]
    pub sortable_tables: Vec<String>,

    /// Ordering used for text columns
    #[serde(default)]
    pub text_collation: TextCollation,

    /// Row click destinations per table
    #[serde(default)]
    pub routes: RouteMap,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Locale-dependent display settings for formatted cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono pattern for date cells
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Text shown for date cells with no value
    #[serde(default = "default_pending_label")]
    pub pending_label: String,

    /// Thousands separator for numeric cells
    #[serde(default = "default_grouping_separator")]
    pub grouping_separator: char,
}

fn default_sortable_tables() -> Vec<String> {
    [
        "tradesmen-table",
        "jobs-table",
        "groups-table",
        "jobs-search-table",
        "tradesmen-search-table",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_date_format() -> String {
    "%-d %b %Y".to_string()
}

fn default_pending_label() -> String {
    "Date pending".to_string()
}

fn default_grouping_separator() -> char {
    ','
}

impl Default for DashtableConfig {
    fn default() -> Self {
        Self {
            sortable_tables: default_sortable_tables(),
            text_collation: TextCollation::default(),
            routes: RouteMap::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            pending_label: default_pending_label(),
            grouping_separator: default_grouping_separator(),
        }
    }
}

impl DashtableConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse the embedded configuration, falling back to defaults
    pub fn load(json: Option<&str>) -> Self {
        match json.map(str::trim).filter(|s| !s.is_empty()) {
            None => DashtableConfig::default(),
            Some(json) => DashtableConfig::from_json(json).unwrap_or_else(|e| {
                tracing::warn!("{}, using defaults", e);
                DashtableConfig::default()
            }),
        }
    }
}
