//! Ledger record types shared by ingestion, filtering and aggregation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::status;

/// One ledger line, normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier assigned at ingestion time
    pub id: String,
    /// File this transaction was ingested from
    pub file_id: String,
    /// "Rodzaj"
    pub category: String,
    /// "Skąd"
    pub source: String,
    /// "Co"
    pub description: String,
    /// Normalized amount used for every sum
    pub amount: Decimal,
    /// Amount cell exactly as read
    pub amount_original: String,
    pub is_paid: bool,
    /// Raw "Gotówka" cell; see [`Transaction::is_cash`]
    #[serde(default)]
    pub is_cash: String,
    #[serde(default)]
    pub bank: String,
    /// ISO `YYYY-MM-DD`, when the export carried a date column
    #[serde(default)]
    pub transaction_date: Option<String>,
}

impl Transaction {
    /// Whether the raw cash marker reads as truthy.
    pub fn is_cash(&self) -> bool {
        status::is_truthy(&self.is_cash)
    }

    /// Source label for grouping, with `fallback` standing in for blanks.
    pub fn source_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.source.trim().is_empty() {
            fallback
        } else {
            &self.source
        }
    }
}

/// Total for one category or source within a grouping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupTotal {
    #[serde(alias = "category", alias = "source")]
    pub key: String,
    pub total: Decimal,
    pub count: usize,
    /// Share of the grouping's grand total, 0-100
    pub percentage: f64,
}

pub type CategoryTotal = GroupTotal;
pub type SourceTotal = GroupTotal;

/// Paid/unpaid partition plus the overlapping cash subset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub total_spent: Decimal,
    pub paid_amount: Decimal,
    pub unpaid_amount: Decimal,
    pub paid_count: usize,
    pub unpaid_count: usize,
    #[serde(default)]
    pub cash_amount: Decimal,
    #[serde(default)]
    pub cash_count: usize,
}

/// An ingested file. Transactions point at it through `file_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    /// Unix seconds
    pub uploaded_at: i64,
    #[serde(default)]
    pub transaction_count: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(source: &str, is_cash: &str) -> Transaction {
        Transaction {
            id: "t-1".into(),
            file_id: "f-1".into(),
            category: "Jedzenie".into(),
            source: source.into(),
            description: "Obiad".into(),
            amount: Decimal::new(1250, 2),
            amount_original: "12,50 zł".into(),
            is_paid: true,
            is_cash: is_cash.into(),
            bank: String::new(),
            transaction_date: None,
        }
    }

    #[test]
    fn test_cash_marker_is_classified_on_read() {
        assert!(txn("Bank", "TAK").is_cash());
        assert!(txn("Bank", "✅").is_cash());
        assert!(!txn("Bank", "").is_cash());
        assert!(!txn("Bank", "nie").is_cash());
    }

    #[test]
    fn test_blank_source_uses_fallback() {
        assert_eq!(txn("  ", "").source_or("Unknown"), "Unknown");
        assert_eq!(txn("mBank", "").source_or("Unknown"), "mBank");
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let v = serde_json::to_value(txn("Bank", "tak")).unwrap();
        assert_eq!(v["fileId"], "f-1");
        assert_eq!(v["amountOriginal"], "12,50 zł");
        assert_eq!(v["isPaid"], true);
        assert_eq!(v["amount"], 12.5);
    }

    #[test]
    fn test_group_total_accepts_remote_field_names() {
        let c: GroupTotal =
            serde_json::from_str(r#"{"category":"Dom","total":300.0,"count":2,"percentage":75.0}"#)
                .unwrap();
        assert_eq!(c.key, "Dom");
        assert_eq!(c.total, Decimal::new(300, 0));

        let s: GroupTotal =
            serde_json::from_str(r#"{"source":"Bank","total":100,"count":1,"percentage":25.0}"#)
                .unwrap();
        assert_eq!(s.key, "Bank");
    }
}
