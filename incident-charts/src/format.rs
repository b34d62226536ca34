//! Display formatting for dashboard numbers, dates and tooltips

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

use crate::error::{ChartError, Result};

/// Insert a thousands separator every three digits: `1234567` -> `1,234,567`.
pub fn format_number(n: i64) -> String {
    n.to_formatted_string(&Locale::en)
}

/// Render an ISO-8601 date or timestamp as a short date (`Jan 5, 2024`).
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and offset-less
/// `YYYY-MM-DDTHH:MM:SS`. This is best-effort formatting, not validation:
/// anything else returns the date parser's error.
pub fn format_date(input: &str) -> Result<String> {
    let trimmed = input.trim();

    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date())
        })
        .map_err(|source| ChartError::InvalidDate {
            input: input.to_string(),
            source,
        })?;

    Ok(date.format("%b %-d, %Y").to_string())
}

/// Tooltip text `label: value (pct%)` where `pct` is the rounded share of `total`.
///
/// A zero total renders as `0%` rather than a division artifact.
pub fn percentage_label(label: &str, value: f64, total: f64) -> String {
    let percentage = if total == 0.0 {
        0.0
    } else {
        (value / total * 100.0).round()
    };
    format!("{}: {} ({}%)", label, value, percentage)
}
