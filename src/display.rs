//! Text formatting for intervals and dates.

use chrono::DateTime;

/// Human-friendly interval length: "3 days", "1.5 months", "2.0 years".
pub fn format_days(days: f64) -> String {
    if days.is_nan() {
        return "N/A".to_string();
    }
    if days < 1.0 {
        "<1 day".to_string()
    } else if days < 30.0 {
        let plural = if days >= 1.5 { "s" } else { "" };
        format!("{} day{plural}", days.round())
    } else if days < 365.0 {
        let plural = if days >= 45.0 { "s" } else { "" };
        format!("{:.1} month{plural}", days / 30.0)
    } else {
        let plural = if days >= 548.0 { "s" } else { "" };
        format!("{:.1} year{plural}", days / 365.0)
    }
}

/// Formats epoch milliseconds as a UTC `YYYY-MM-DD` date
pub fn format_date(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Like [`format_date`], but "Never" for an item that was not graded yet.
pub fn format_last_reviewed(millis: Option<i64>) -> String {
    millis.map_or_else(|| "Never".to_string(), format_date)
}
