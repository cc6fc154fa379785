//! Expected shape of a ledger export: preamble length and header names.

use serde::{Deserialize, Serialize};

/// Columns the row mapper knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Category,
    Source,
    Description,
    Amount,
    Paid,
    Cash,
    Date,
    Bank,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Category,
        Column::Source,
        Column::Description,
        Column::Amount,
        Column::Paid,
        Column::Cash,
        Column::Date,
        Column::Bank,
    ];

    /// Columns every export is supposed to carry; the rest are optional.
    pub fn is_expected(self) -> bool {
        !matches!(self, Column::Date | Column::Bank)
    }
}

/// Ledger export layout.
///
/// Export files open with a few metadata lines (sheet title, owner, period)
/// before the header row; `skip_rows` of them are dropped unread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvLayout {
    pub skip_rows: usize,
    pub columns: ColumnNames,
}

/// Header text for each column, matched exactly (after trimming).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub category: String,
    pub source: String,
    pub description: String,
    pub amount: String,
    pub paid: String,
    pub cash: String,
    pub date: String,
    pub bank: String,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            skip_rows: 3,
            columns: ColumnNames::default(),
        }
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            category: "Rodzaj".to_string(),
            source: "Skąd".to_string(),
            description: "Co".to_string(),
            amount: "Za ile".to_string(),
            paid: "Opłacone?".to_string(),
            cash: "Gotówka".to_string(),
            date: "Data".to_string(),
            bank: "Bank".to_string(),
        }
    }
}

impl ColumnNames {
    pub fn name(&self, column: Column) -> &str {
        match column {
            Column::Category => &self.category,
            Column::Source => &self.source,
            Column::Description => &self.description,
            Column::Amount => &self.amount,
            Column::Paid => &self.paid,
            Column::Cash => &self.cash,
            Column::Date => &self.date,
            Column::Bank => &self.bank,
        }
    }
}
