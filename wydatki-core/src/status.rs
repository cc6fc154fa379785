//! Paid / cash marker classification.
//!
//! Exports mark status with words in either language or with a checkmark.
//! Some files went through a Windows-1252 round trip, which turns `✅` into
//! the literal text `âœ…`; that spelling is accepted as well.

/// Tokens accepted as "yes", compared after trimming and lowercasing.
pub const TRUTHY_TOKENS: &[&str] = &["tak", "yes", "true", "✅", "✓", "✔", "âœ…"];

const CHECKMARKS: &[&str] = &["✅", "✔", "✓", "âœ…"];

/// Whether a raw marker cell reads as "yes". Blank or unknown text is `false`.
pub fn is_truthy(raw: &str) -> bool {
    let value = raw.trim().to_lowercase();
    if value.is_empty() {
        return false;
    }
    TRUTHY_TOKENS.contains(&value.as_str()) || CHECKMARKS.iter().any(|c| value.contains(c))
}

/// Paid status for the "Opłacone?" column.
pub fn parse_paid(raw: &str) -> bool {
    is_truthy(raw)
}
