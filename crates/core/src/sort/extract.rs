//! Value extraction and comparison for sortable cells
//!
//! Every cell is turned into a [`SortKey`] once per sort. Extraction never
//! fails: malformed or missing text degrades to the neutral value of the
//! column type (empty text, `0.0`, or [`DATE_SENTINEL`]).

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::types::ColumnType;

/// Date used for cells that cannot be parsed; sorts before every real date
pub const DATE_SENTINEL: NaiveDateTime = NaiveDateTime::MIN;

/// Currency symbols removed before parsing a number
const CURRENCY_SYMBOLS: &[char] = &[
    '€', '£', '$', '¥', '¢', '₹', '₽', '₩', '₺', '₴', '₦', '₱', '₪', '₫', '₡', '₲', '₵', '₸',
];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %b %Y", "%d %B %Y", "%d/%m/%Y"];

/// How text columns are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextCollation {
    /// Case-insensitive first, raw text breaks ties
    #[default]
    Locale,
    /// Plain code point order
    Ordinal,
}

/// Comparable value extracted from a cell
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text { raw: String, folded: String },
    Number(f64),
    Date(NaiveDateTime),
}

impl SortKey {
    pub fn text(raw: &str) -> Self {
        let raw = raw.trim();
        SortKey::Text {
            raw: raw.to_string(),
            folded: fold(raw),
        }
    }

    /// Extract the key for a cell of the given type; `None` means the row
    /// has no such cell
    pub fn extract(cell: Option<&str>, kind: ColumnType) -> Self {
        let cell = cell.unwrap_or("");
        match kind {
            ColumnType::Text => SortKey::text(cell),
            ColumnType::Number => SortKey::Number(parse_number(cell).unwrap_or(0.0)),
            ColumnType::Date => SortKey::Date(parse_date(cell).unwrap_or(DATE_SENTINEL)),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Text { .. } => 0,
            SortKey::Number(_) => 1,
            SortKey::Date(_) => 2,
        }
    }

    /// Ascending comparison; descending is always the reverse of this
    pub fn compare(&self, other: &SortKey, collation: TextCollation) -> Ordering {
        match (self, other) {
            (
                SortKey::Text { raw: a, folded: fa },
                SortKey::Text { raw: b, folded: fb },
            ) => match collation {
                TextCollation::Locale => fa.cmp(fb).then_with(|| a.cmp(b)),
                TextCollation::Ordinal => a.cmp(b),
            },
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Strip currency symbols, thousands separators and whitespace, then parse
///
/// Returns `None` for empty or non-numeric input and for non-finite results.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',' && *c != '\'' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| if n == 0.0 { 0.0 } else { n })
}

/// Case and accent folded form used by [`TextCollation::Locale`]
fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Parse a calendar date or date-time in any of the accepted layouts
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
