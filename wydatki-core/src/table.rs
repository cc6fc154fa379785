//! Helpers for tabular views of a transaction list.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Transaction;

/// Only transactions of `category`; `None` keeps everything.
pub fn filter_by_category(txns: &[Transaction], category: Option<&str>) -> Vec<Transaction> {
    match category {
        None => txns.to_vec(),
        Some(c) => txns.iter().filter(|t| t.category == c).cloned().collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    Category,
    Source,
    Description,
    Amount,
    IsPaid,
    IsCash,
    TransactionDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sorted copy of `txns`. Text columns compare case-insensitively; equal
/// rows keep their input order.
pub fn sort_transactions(
    txns: &[Transaction],
    column: SortColumn,
    direction: SortDirection,
) -> Vec<Transaction> {
    let mut out = txns.to_vec();
    out.sort_by(|a, b| {
        let ord = compare(a, b, column);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    out
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "category" => Ok(Self::Category),
            "source" => Ok(Self::Source),
            "description" => Ok(Self::Description),
            "amount" => Ok(Self::Amount),
            "ispaid" | "paid" => Ok(Self::IsPaid),
            "iscash" | "cash" => Ok(Self::IsCash),
            "transactiondate" | "date" => Ok(Self::TransactionDate),
            other => Err(format!("unknown sort column: {other}")),
        }
    }
}

fn compare(a: &Transaction, b: &Transaction, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Amount => a.amount.cmp(&b.amount),
        SortColumn::IsPaid => a.is_paid.cmp(&b.is_paid),
        SortColumn::IsCash => a.is_cash().cmp(&b.is_cash()),
        SortColumn::Category => text_cmp(&a.category, &b.category),
        SortColumn::Source => text_cmp(&a.source, &b.source),
        SortColumn::Description => text_cmp(&a.description, &b.description),
        SortColumn::TransactionDate => a.transaction_date.cmp(&b.transaction_date),
    }
}

fn text_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn txn(id: &str, category: &str, cents: i64, paid: bool) -> Transaction {
        Transaction {
            id: id.into(),
            file_id: "f".into(),
            category: category.into(),
            source: String::new(),
            description: String::new(),
            amount: Decimal::new(cents, 2),
            amount_original: String::new(),
            is_paid: paid,
            is_cash: String::new(),
            bank: String::new(),
            transaction_date: None,
        }
    }

    fn ids(txns: &[Transaction]) -> Vec<&str> {
        txns.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_filter_by_category() {
        let txns = vec![txn("1", "Dom", 100, false), txn("2", "Auto", 200, false)];
        assert_eq!(ids(&filter_by_category(&txns, Some("Auto"))), vec!["2"]);
        assert_eq!(filter_by_category(&txns, None).len(), 2);
    }

    #[test]
    fn test_sort_by_amount_both_ways() {
        let txns = vec![
            txn("a", "x", 500, false),
            txn("b", "x", -100, false),
            txn("c", "x", 1200, false),
        ];
        let asc = sort_transactions(&txns, SortColumn::Amount, SortDirection::Asc);
        assert_eq!(ids(&asc), vec!["b", "a", "c"]);
        let desc = sort_transactions(&txns, SortColumn::Amount, SortDirection::Desc);
        assert_eq!(ids(&desc), vec!["c", "a", "b"]);
        // input untouched
        assert_eq!(ids(&txns), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_text_ignores_case() {
        let txns = vec![
            txn("1", "zakupy", 0, false),
            txn("2", "Auto", 0, false),
            txn("3", "dom", 0, false),
        ];
        let sorted = sort_transactions(&txns, SortColumn::Category, SortDirection::Asc);
        assert_eq!(ids(&sorted), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_sort_column_names() {
        assert_eq!("amount".parse::<SortColumn>(), Ok(SortColumn::Amount));
        assert_eq!("isPaid".parse::<SortColumn>(), Ok(SortColumn::IsPaid));
        assert_eq!("transaction-date".parse::<SortColumn>(), Ok(SortColumn::TransactionDate));
        assert!("kwota".parse::<SortColumn>().is_err());
    }

    #[test]
    fn test_sort_paid_keeps_ties_stable() {
        let txns = vec![
            txn("1", "x", 0, true),
            txn("2", "x", 0, false),
            txn("3", "x", 0, true),
        ];
        let sorted = sort_transactions(&txns, SortColumn::IsPaid, SortDirection::Asc);
        assert_eq!(ids(&sorted), vec!["2", "1", "3"]);
    }
}
