//! Display formatting for date and numeric cells
//!
//! Runs once on page load and is independent of sorting. Every function
//! returns `None` when the text should be left as rendered by the server.

use std::fmt::Write;

use crate::config::DisplayConfig;
use crate::sort::parse_date;

/// Currency prefixes recognised on numeric cells
const CURRENCY_PREFIXES: &[char] = &['€', '£', '$'];

/// Format a raw date for display, e.g. `2024-03-15` as `15 Mar 2024`
pub fn format_date(raw: &str, cfg: &DisplayConfig) -> Option<String> {
    if raw.trim().is_empty() {
        return Some(cfg.pending_label.clone());
    }
    let parsed = parse_date(raw)?;
    let mut out = String::new();
    match write!(out, "{}", parsed.format(&cfg.date_format)) {
        Ok(()) => Some(out),
        Err(_) => {
            let pattern = &cfg.date_format;
            tracing::warn!(format = %pattern, "invalid date format pattern");
            None
        }
    }
}

/// Text for a `.date-cell` given its `data-date` attribute
///
/// Cells with a missing or blank attribute keep their server-rendered text.
pub fn date_cell_text(attribute: Option<&str>, cfg: &DisplayConfig) -> Option<String> {
    match attribute {
        Some(raw) if !raw.trim().is_empty() => format_date(raw, cfg),
        _ => None,
    }
}

/// Format the integer part of a number with grouping separators
///
/// Input is machine formatted: `.` starts the fraction, which is dropped,
/// and `,` is a thousands separator. Text already grouped with the
/// configured separator is accepted as is, so formatting twice is stable.
/// Empty input reads as zero.
pub fn format_number(raw: &str, cfg: &DisplayConfig) -> Option<String> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Some("0".to_string());
    }

    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };
    let digits: String = if is_grouped(unsigned, cfg.grouping_separator) {
        unsigned.chars().filter(|c| *c != cfg.grouping_separator).collect()
    } else {
        unsigned
            .chars()
            .filter(|c| *c != ',')
            .take_while(|c| c.is_ascii_digit())
            .collect()
    };
    let value: u128 = digits.parse().ok()?;

    let grouped = group_digits(&value.to_string(), cfg.grouping_separator);
    if negative && value != 0 {
        Some(format!("-{}", grouped))
    } else {
        Some(grouped)
    }
}

/// Reformat a `td.numeric` cell: currency amounts keep their symbol, plain
/// digit runs get grouped, anything else is left alone
pub fn format_numeric_cell(text: &str, cfg: &DisplayConfig) -> Option<String> {
    let text = text.trim();
    let mut chars = text.chars();
    match chars.next() {
        Some(symbol) if CURRENCY_PREFIXES.contains(&symbol) => {
            let amount = chars.as_str();
            if !amount.trim().chars().any(|c| c.is_ascii_digit()) && !amount.trim().is_empty() {
                return None;
            }
            format_number(amount, cfg).map(|n| format!("{}{}", symbol, n))
        }
        Some(_) if text.chars().all(|c| c.is_ascii_digit()) => format_number(text, cfg),
        _ => None,
    }
}

/// `1.250.000` style: a 1-3 digit head followed by 3-digit groups
fn is_grouped(text: &str, separator: char) -> bool {
    let mut groups = text.split(separator);
    let head_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && g.chars().all(|c| c.is_ascii_digit()));
    let mut tail = 0;
    let tail_ok = groups.all(|g| {
        tail += 1;
        g.len() == 3 && g.chars().all(|c| c.is_ascii_digit())
    });
    head_ok && tail_ok && tail > 0
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
