//! Row click-to-navigate resolution
//!
//! Clickable rows carry an identifier in `data-<stem>-id`, where `<stem>` is
//! the table id without its `-table` suffix. A [`RouteMap`] turns that id into
//! a destination path; rows no rule can resolve fall back to their first link.

use serde::{Deserialize, Serialize};

/// Label announced for clickable rows
pub const ROW_ARIA_LABEL: &str = "Click to view details";

/// Swap the path when a marker class is missing from the row icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteVariant {
    /// Class on the row icon that keeps the rule's own path
    pub marker_class: String,
    /// Path used when the marker is absent
    pub otherwise: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Table id the rule applies to
    pub table: String,
    /// Path prefix, the row id is appended as the last segment
    pub path: String,
    #[serde(default)]
    pub variant: Option<RouteVariant>,
}

impl RouteRule {
    pub fn new(table: &str, path: &str) -> Self {
        Self {
            table: table.to_string(),
            path: path.to_string(),
            variant: None,
        }
    }

    pub fn with_variant(mut self, marker_class: &str, otherwise: &str) -> Self {
        self.variant = Some(RouteVariant {
            marker_class: marker_class.to_string(),
            otherwise: otherwise.to_string(),
        });
        self
    }

    fn destination(&self, row: &RowInfo) -> Option<String> {
        let id = row.data_id.as_deref().map(str::trim).filter(|id| !id.is_empty())?;
        let prefix = match &self.variant {
            Some(v) if !row.marker_classes.iter().any(|c| c == &v.marker_class) => &v.otherwise,
            _ => &self.path,
        };
        Some(format!("{}/{}", prefix.trim_end_matches('/'), urlencoding::encode(id)))
    }
}

/// What the host read from a clicked row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowInfo {
    /// Value of the row's `data-<stem>-id` attribute
    pub data_id: Option<String>,
    /// Classes of the row's icon element
    pub marker_classes: Vec<String>,
    /// Target of the first link inside the row
    pub first_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteMap {
    rules: Vec<RouteRule>,
}

impl Default for RouteMap {
    fn default() -> Self {
        Self {
            rules: vec![
                RouteRule::new("tradesmen-table", "/tradesmen"),
                RouteRule::new("jobs-table", "/jobs").with_variant("fa-hammer", "/quotes"),
                RouteRule::new("groups-table", "/groups"),
            ],
        }
    }
}

impl RouteMap {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn rule_for(&self, table_id: &str) -> Option<&RouteRule> {
        self.rules.iter().find(|r| r.table == table_id)
    }

    /// Destination for a clicked row, or `None` to stay on the page
    pub fn resolve(&self, table_id: &str, row: &RowInfo) -> Option<String> {
        self.rule_for(table_id)
            .and_then(|rule| rule.destination(row))
            .or_else(|| row.first_link.clone().filter(|href| !href.is_empty()))
    }
}

/// Attribute holding a row's identifier for a table, e.g. `data-jobs-id`
pub fn id_attribute(table_id: &str) -> String {
    let stem = table_id.strip_suffix("-table").unwrap_or(table_id);
    format!("data-{}-id", stem)
}

/// Clicks on links and buttons inside a row keep their own behavior
pub fn is_interactive_tag(tag_name: &str) -> bool {
    tag_name.eq_ignore_ascii_case("a") || tag_name.eq_ignore_ascii_case("button")
}

/// Keys that activate a focused row like a click
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(id: &str, classes: &[&str]) -> RowInfo {
        RowInfo {
            data_id: Some(id.to_string()),
            marker_classes: classes.iter().map(|c| c.to_string()).collect(),
            first_link: None,
        }
    }

    #[rstest]
    #[case("tradesmen-table", &[], "/tradesmen/7")]
    #[case("groups-table", &[], "/groups/7")]
    #[case("jobs-table", &["fas", "fa-hammer"], "/jobs/7")]
    #[case("jobs-table", &["fas", "fa-file-invoice"], "/quotes/7")]
    fn default_routes(#[case] table: &str, #[case] classes: &[&str], #[case] expected: &str) {
        let routes = RouteMap::default();
        assert_eq!(routes.resolve(table, &row("7", classes)), Some(expected.to_string()));
    }

    #[test]
    fn row_without_id_falls_back_to_first_link() {
        let routes = RouteMap::default();
        let info = RowInfo {
            data_id: None,
            marker_classes: vec![],
            first_link: Some("/tradesmen/9/edit".to_string()),
        };
        assert_eq!(routes.resolve("tradesmen-table", &info), Some("/tradesmen/9/edit".to_string()));
    }

    #[test]
    fn unknown_table_without_link_stays_put() {
        let routes = RouteMap::default();
        assert_eq!(routes.resolve("jobs-search-table", &row("3", &[])), None);
    }

    #[test]
    fn ids_are_encoded() {
        let routes = RouteMap::new(vec![RouteRule::new("groups-table", "/groups/")]);
        assert_eq!(
            routes.resolve("groups-table", &row("a b/c", &[])),
            Some("/groups/a%20b%2Fc".to_string())
        );
    }

    #[test]
    fn id_attribute_strips_table_suffix() {
        assert_eq!(id_attribute("jobs-table"), "data-jobs-id");
        assert_eq!(id_attribute("overview"), "data-overview-id");
    }

    #[rstest]
    #[case("A", true)]
    #[case("button", true)]
    #[case("TD", false)]
    #[case("I", false)]
    fn interactive_tags(#[case] tag: &str, #[case] expected: bool) {
        assert_eq!(is_interactive_tag(tag), expected);
    }

    #[test]
    fn activation_keys() {
        assert!(is_activation_key("Enter"));
        assert!(is_activation_key(" "));
        assert!(!is_activation_key("Tab"));
    }
}
