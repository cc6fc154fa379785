//! Date cell parsing.

use chrono::NaiveDate;

const FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d", "%d.%m.%Y"];

/// Parse a date cell in any of the accepted layouts, returning `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map(|d| d.format("%Y-%m-%d").to_string())
}
