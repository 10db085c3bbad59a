//! Field formatting shared by the page renderers.

use chrono::{Datelike, NaiveDate};

const NOT_AVAILABLE: &str = "N/A";

/// Escape text for inclusion in HTML element content or quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// `2010-07-15` -> `7/15/2010`; empty or unparseable dates -> `N/A`.
pub fn format_release_date(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Four-digit release year, or `N/A`.
/// Year of a release date. A bare `YYYY` (or any value starting with four
/// digits) still yields the year when the full date does not parse.
pub fn release_year(date: &str) -> String {
    if let Some(d) = parse_date(date) {
        return d.year().to_string();
    }
    match date.trim().get(..4) {
        Some(year) if year.bytes().all(|b| b.is_ascii_digit()) => year.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_runtime(runtime: Option<u32>) -> String {
    match runtime {
        Some(minutes) if minutes > 0 => format!("{minutes} minutes"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `7.456, 1234` -> `7.5 / 10 (1234 votes)`.
///
/// A zero average renders as `N/A`; a zero vote count drops the suffix.
pub fn format_rating(vote_average: Option<f64>, vote_count: Option<u64>) -> String {
    let mut out = match vote_average {
        Some(avg) if avg != 0.0 => format!("{avg:.1} / 10"),
        _ => NOT_AVAILABLE.to_string(),
    };
    if let Some(count) = vote_count.filter(|c| *c > 0) {
        out.push_str(&format!(" ({count} votes)"));
    }
    out
}

/// Group digits in threes: `1234567` -> `1,234,567`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Dollar amount for budget/revenue lines; `None` hides the line.
pub fn format_currency(amount: u64) -> Option<String> {
    (amount > 0).then(|| format!("${}", thousands(amount)))
}
