//! Statistics sources.
//!
//! [`StatsProvider`] is the contract the presentation layer talks to. The
//! in-memory [`LocalStats`] computes everything with the functions in
//! [`crate::aggregate`]; a remote service can stand in for it with the same
//! record shapes.

use wydatki_core::{
    CategoryTotal, FileRecord, PaymentSummary, Result, SourceTotal, Transaction,
    TransactionFilter,
};

use crate::aggregate::{self, UNKNOWN_SOURCE};

pub trait StatsProvider {
    fn files(&self) -> Result<Vec<FileRecord>>;

    fn file(&self, id: &str) -> Result<Option<FileRecord>> {
        Ok(self.files()?.into_iter().find(|f| f.id == id))
    }

    /// Remove a file and every transaction it owns.
    fn delete_file(&mut self, id: &str) -> Result<()>;

    fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>>;

    fn summary(&self, filter: &TransactionFilter) -> Result<PaymentSummary> {
        Ok(aggregate::payment_summary(&self.transactions(filter)?))
    }

    fn category_totals(&self, filter: &TransactionFilter) -> Result<Vec<CategoryTotal>> {
        Ok(aggregate::group_by_category(&self.transactions(filter)?))
    }

    fn source_totals(&self, filter: &TransactionFilter) -> Result<Vec<SourceTotal>> {
        Ok(aggregate::group_by_source(&self.transactions(filter)?))
    }

    fn top_category(&self, filter: &TransactionFilter) -> Result<Option<CategoryTotal>> {
        Ok(self.category_totals(filter)?.into_iter().next())
    }
}

/// Files and their transactions held in memory. Transactions stay in
/// ingestion order, file after file.
#[derive(Debug, Clone)]
pub struct LocalStats {
    files: Vec<FileRecord>,
    transactions: Vec<Transaction>,
    unknown_label: String,
}

impl Default for LocalStats {
    fn default() -> Self {
        Self::new(UNKNOWN_SOURCE)
    }
}

impl LocalStats {
    pub fn new(unknown_label: impl Into<String>) -> Self {
        Self {
            files: Vec::new(),
            transactions: Vec::new(),
            unknown_label: unknown_label.into(),
        }
    }

    /// Add an ingested file. Re-adding a known id replaces its transactions.
    pub fn add_file(&mut self, record: FileRecord, txns: Vec<Transaction>) {
        self.transactions.retain(|t| t.file_id != record.id);
        self.files.retain(|f| f.id != record.id);
        self.transactions.extend(txns);
        self.files.push(record);
    }

    pub fn all_transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl StatsProvider for LocalStats {
    fn files(&self) -> Result<Vec<FileRecord>> {
        Ok(self.files.clone())
    }

    fn delete_file(&mut self, id: &str) -> Result<()> {
        self.files.retain(|f| f.id != id);
        self.transactions.retain(|t| t.file_id != id);
        Ok(())
    }

    fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        Ok(filter.apply(&self.transactions))
    }

    fn source_totals(&self, filter: &TransactionFilter) -> Result<Vec<SourceTotal>> {
        Ok(aggregate::group_by_source_with(
            &self.transactions(filter)?,
            &self.unknown_label,
        ))
    }
}
