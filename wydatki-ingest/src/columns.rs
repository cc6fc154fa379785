//! Header discovery and row mapping.
//!
//! Header positions are resolved once per file into a [`ColumnIndex`]; every
//! data row is then mapped through that index.

use std::collections::HashMap;

use csv::StringRecord;
use uuid::Uuid;
use wydatki_core::{amount, date, status, NormalizeError, Transaction};

use crate::layout::{Column, ColumnNames};

/// Resolved header positions for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: HashMap<Column, usize>,
}

impl ColumnIndex {
    /// Look up every known column in `headers`. The first exact match wins;
    /// a column that is absent stays unresolved and reads as empty.
    pub fn resolve(headers: &StringRecord, names: &ColumnNames) -> Self {
        let mut positions = HashMap::new();
        for column in Column::ALL {
            let wanted = names.name(column);
            if let Some(pos) = headers.iter().position(|h| h.trim() == wanted) {
                positions.insert(column, pos);
            }
        }
        Self { positions }
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions.get(&column).copied()
    }

    /// Expected columns the header did not contain.
    pub fn missing(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| c.is_expected() && !self.positions.contains_key(c))
            .collect()
    }

    /// Trimmed cell for `column`, empty when unresolved or past the row end.
    pub fn get<'r>(&self, record: &'r StringRecord, column: Column) -> &'r str {
        self.position(column)
            .and_then(|pos| record.get(pos))
            .map(str::trim)
            .unwrap_or("")
    }
}

/// Why a data row did not become a transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSkip {
    /// Every cell blank
    Blank,
    /// Amount cell empty or only a currency marker
    NoAmount,
    BadAmount(NormalizeError),
}

pub fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

/// Map one data row into a transaction owned by `file_id`.
pub fn map_row(
    record: &StringRecord,
    index: &ColumnIndex,
    file_id: &str,
) -> Result<Transaction, RowSkip> {
    if is_blank(record) {
        return Err(RowSkip::Blank);
    }

    let amount_original = index.get(record, Column::Amount);
    let amount = amount::normalize(amount_original)
        .map_err(RowSkip::BadAmount)?
        .ok_or(RowSkip::NoAmount)?;

    Ok(Transaction {
        id: Uuid::new_v4().to_string(),
        file_id: file_id.to_string(),
        category: index.get(record, Column::Category).to_string(),
        source: index.get(record, Column::Source).to_string(),
        description: index.get(record, Column::Description).to_string(),
        amount,
        amount_original: amount_original.to_string(),
        is_paid: status::parse_paid(index.get(record, Column::Paid)),
        is_cash: index.get(record, Column::Cash).to_string(),
        bank: index.get(record, Column::Bank).to_string(),
        transaction_date: date::parse_date(index.get(record, Column::Date)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn header() -> StringRecord {
        StringRecord::from(vec!["Rodzaj", "Skąd", "Co", "Za ile", "Opłacone?", "Gotówka"])
    }

    #[test]
    fn test_resolve_by_name_not_position() {
        let headers = StringRecord::from(vec![" Za ile ", "Co", "Rodzaj"]);
        let index = ColumnIndex::resolve(&headers, &ColumnNames::default());
        assert_eq!(index.position(Column::Amount), Some(0));
        assert_eq!(index.position(Column::Category), Some(2));
        assert_eq!(index.position(Column::Source), None);
        assert_eq!(
            index.missing(),
            vec![Column::Source, Column::Paid, Column::Cash]
        );
    }

    #[test]
    fn test_header_match_is_case_sensitive() {
        let headers = StringRecord::from(vec!["rodzaj", "ZA ILE"]);
        let index = ColumnIndex::resolve(&headers, &ColumnNames::default());
        assert_eq!(index.position(Column::Category), None);
        assert_eq!(index.position(Column::Amount), None);
    }

    #[test]
    fn test_map_row() {
        let index = ColumnIndex::resolve(&header(), &ColumnNames::default());
        let row = StringRecord::from(vec!["Jedzenie", "Bank", "Obiad", "1.092,50 zł", "tak", "✅"]);
        let txn = map_row(&row, &index, "f-1").unwrap();
        assert_eq!(txn.category, "Jedzenie");
        assert_eq!(txn.amount, Decimal::new(109250, 2));
        assert_eq!(txn.amount_original, "1.092,50 zł");
        assert!(txn.is_paid);
        assert_eq!(txn.is_cash, "✅");
        assert!(txn.is_cash());
        assert_eq!(txn.file_id, "f-1");
        assert_eq!(txn.transaction_date, None);
        assert!(!txn.id.is_empty());
    }

    #[test]
    fn test_missing_columns_read_empty() {
        let headers = StringRecord::from(vec!["Za ile"]);
        let index = ColumnIndex::resolve(&headers, &ColumnNames::default());
        let txn = map_row(&StringRecord::from(vec!["10"]), &index, "f").unwrap();
        assert_eq!(txn.category, "");
        assert_eq!(txn.source, "");
        assert!(!txn.is_paid);
    }

    #[test]
    fn test_short_row_reads_empty_tail() {
        let index = ColumnIndex::resolve(&header(), &ColumnNames::default());
        let row = StringRecord::from(vec!["Dom", "", "Prąd", "200"]);
        let txn = map_row(&row, &index, "f").unwrap();
        assert!(!txn.is_paid);
        assert_eq!(txn.is_cash, "");
    }

    #[test]
    fn test_skips() {
        let index = ColumnIndex::resolve(&header(), &ColumnNames::default());
        assert_eq!(
            map_row(&StringRecord::from(vec!["", " ", "", ""]), &index, "f"),
            Err(RowSkip::Blank)
        );
        assert_eq!(
            map_row(&StringRecord::from(vec!["Dom", "", "", "zł"]), &index, "f"),
            Err(RowSkip::NoAmount)
        );
        assert!(matches!(
            map_row(&StringRecord::from(vec!["Dom", "", "", "abc"]), &index, "f"),
            Err(RowSkip::BadAmount(_))
        ));
    }

    #[test]
    fn test_ids_are_unique() {
        let index = ColumnIndex::resolve(&header(), &ColumnNames::default());
        let row = StringRecord::from(vec!["Dom", "", "", "1"]);
        let a = map_row(&row, &index, "f").unwrap();
        let b = map_row(&row, &index, "f").unwrap();
        assert_ne!(a.id, b.id);
    }
}
