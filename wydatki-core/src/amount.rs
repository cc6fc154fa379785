//! Amount normalization for exports with no declared locale.
//!
//! Cells look like `1.092,50 zł`, `1,092.50`, `$ 12`, `-45,00 PLN`. The
//! decimal separator is inferred from the text alone:
//!
//! - comma and period both present: whichever occurs last is the decimal
//!   separator, the other one is grouping;
//! - only commas: a trailing `,dd` is a decimal comma, anything else is grouping;
//! - only periods (or no separator): parsed as is.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::NormalizeError;

static STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pln|usd|eur|zł|zl|\$|€|\s").expect("valid regex"));

static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pln|usd|eur|zł|\$|€").expect("valid regex"));

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid regex")
});

static DECIMAL_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\d{2}$").expect("valid regex"));

/// Largest magnitude a single ledger amount may have: 10^15.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x38D7E, 0, false, 0);

/// Normalize a raw amount cell.
///
/// `Ok(None)` means the cell holds no amount at all (blank, or only currency
/// markers). `Err` means something is left that is not a number, or the
/// number is beyond [`MAX_AMOUNT`].
pub fn normalize(raw: &str) -> Result<Option<Decimal>, NormalizeError> {
    let stripped = STRIP_RE.replace_all(raw, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return Ok(None);
    }

    let cleaned = resolve_separators(stripped);
    let parsed = if NUMBER_RE.is_match(&cleaned) {
        parse_number(&cleaned).filter(|d| d.abs() <= MAX_AMOUNT)
    } else {
        None
    };
    match parsed {
        Some(d) => Ok(Some(d)),
        None => Err(NormalizeError {
            raw: raw.to_string(),
            cleaned,
        }),
    }
}

fn parse_number(s: &str) -> Option<Decimal> {
    if s.contains(['e', 'E']) {
        Decimal::from_scientific(s).ok()
    } else {
        Decimal::from_str(s).ok()
    }
}

fn resolve_separators(s: &str) -> String {
    let last_comma = s.rfind(',');
    let last_dot = s.rfind('.');

    match (last_comma, last_dot) {
        (Some(comma), Some(dot)) if comma > dot => s.replace('.', "").replacen(',', ".", 1),
        (Some(_), Some(_)) => s.replace(',', ""),
        (Some(_), None) if DECIMAL_COMMA_RE.is_match(s) => match s.rsplit_once(',') {
            Some((int, frac)) => format!("{}.{}", int.replace(',', ""), frac),
            None => s.to_string(),
        },
        (Some(_), None) => s.replace(',', ""),
        _ => s.to_string(),
    }
}

/// Currency marker found in an original amount cell, `zł` when there is none.
pub fn currency_marker(original: &str) -> &str {
    CURRENCY_RE
        .find(original)
        .map(|m| m.as_str())
        .unwrap_or("zł")
}

/// Display an amount Polish style (`10 920,50 zł`), reusing the currency
/// marker of the original cell.
pub fn format_amount(amount: Decimal, original: &str) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    // pl-PL leaves four-digit numbers ungrouped
    let grouped = if int.len() > 4 {
        let mut out = String::with_capacity(int.len() + int.len() / 3);
        for (i, ch) in int.chars().enumerate() {
            if i > 0 && (int.len() - i) % 3 == 0 {
                out.push('\u{a0}');
            }
            out.push(ch);
        }
        out
    } else {
        int.to_string()
    };

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{frac} {}", currency_marker(original))
}
