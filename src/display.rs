//! Display fallbacks shared by every page view.

use chrono::{DateTime, NaiveDate, Utc};

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN: &str = "Unknown";
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";
pub const UNKNOWN_SERVICE: &str = "Unknown Service";
pub const UNKNOWN_PET: &str = "Unknown Pet";
pub const UNKNOWN_USER: &str = "Unknown User";

/// `RM 12.50`.
#[must_use]
pub fn money(amount: f64) -> String {
    format!("RM {amount:.2}")
}

/// `RM 12.50`, or `RM 0.00` when absent.
#[must_use]
pub fn money_or_zero(amount: Option<f64>) -> String {
    money(amount.unwrap_or(0.0))
}

/// The trimmed value, or `fallback` when missing or blank.
#[must_use]
pub fn text_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(fallback)
}

#[must_use]
pub fn text_or_na(value: Option<&str>) -> &str {
    text_or(value, NOT_AVAILABLE)
}

#[must_use]
pub fn date_or_na(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| NOT_AVAILABLE.to_string(), |d| d.format("%Y-%m-%d").to_string())
}

#[must_use]
pub fn timestamp_or_na(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| NOT_AVAILABLE.to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

#[cfg(test)]
#[path = "display_test.rs"]
mod tests;
