//! Display formatting for money, dates and progress bars.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Date rendering variants used across list pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `March 5, 2024`
    Long,
    /// `Mar 5, 2024`
    Short,
    /// `Mar 5, 2024, 10:30 AM`
    ShortWithTime,
}

/// Format a dollar amount with two decimals; non-finite values render as `$0.00`.
#[must_use]
pub fn format_price(amount: f64) -> String {
    if amount.is_finite() { format!("${amount:.2}") } else { "$0.00".to_owned() }
}

/// Format a number the way it reads in plain prose: no trailing `.0`.
#[must_use]
pub fn format_plain_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 { format!("{value:.0}") } else { format!("{value}") }
}

/// Parse a user-entered amount. Blank, non-numeric and non-finite input is `None`.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a backend timestamp, with or without a UTC offset.
///
/// Offset-less timestamps are taken to be UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let naive_fraction = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
    PrimitiveDateTime::parse(raw, naive)
        .or_else(|_| PrimitiveDateTime::parse(raw, naive_fraction))
        .map(PrimitiveDateTime::assume_utc)
        .ok()
}

/// Format a backend timestamp for display; unparseable input is returned as-is.
#[must_use]
pub fn format_date(raw: &str, style: DateStyle) -> String {
    let Some(ts) = parse_timestamp(raw) else {
        return raw.to_owned();
    };
    let formatted = match style {
        DateStyle::Long => ts.format(format_description!("[month repr:long] [day padding:none], [year]")),
        DateStyle::Short => ts.format(format_description!("[month repr:short] [day padding:none], [year]")),
        DateStyle::ShortWithTime => ts.format(format_description!(
            "[month repr:short] [day padding:none], [year], [hour repr:12 padding:none]:[minute] [period]"
        )),
    };
    formatted.unwrap_or_else(|_| raw.to_owned())
}

/// Percent of `goal` reached by `current`, capped at 100 for progress bars.
#[must_use]
pub fn progress_percent(current: f64, goal: f64) -> f64 {
    if goal <= 0.0 || !goal.is_finite() || !current.is_finite() {
        return 0.0;
    }
    (current / goal * 100.0).clamp(0.0, 100.0)
}
