//! Transaction selection: exclusion sets and the full query filter.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::Transaction;

/// Keep transactions whose category is not excluded AND whose source is not
/// excluded. Order is preserved; the input is untouched.
pub fn exclude(
    txns: &[Transaction],
    excluded_categories: &HashSet<String>,
    excluded_sources: &HashSet<String>,
) -> Vec<Transaction> {
    txns.iter()
        .filter(|t| !excluded_categories.contains(&t.category))
        .filter(|t| !excluded_sources.contains(&t.source))
        .cloned()
        .collect()
}

/// Query shape shared with the remote statistics service.
///
/// Date bounds are inclusive ISO dates; once a bound is set, transactions
/// without a date no longer match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    #[serde(default)]
    pub file_ids: Vec<String>,
    #[serde(default)]
    pub exclude_categories: Vec<String>,
    #[serde(default)]
    pub exclude_sources: Vec<String>,
    pub is_paid: Option<bool>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        if !self.file_ids.is_empty() && !self.file_ids.contains(&txn.file_id) {
            return false;
        }
        if self.exclude_categories.contains(&txn.category)
            || self.exclude_sources.contains(&txn.source)
        {
            return false;
        }
        if self.is_paid.is_some_and(|paid| paid != txn.is_paid) {
            return false;
        }
        if self.date_from.is_none() && self.date_to.is_none() {
            return true;
        }
        // ISO dates compare correctly as strings
        let Some(date) = txn.transaction_date.as_deref() else {
            return false;
        };
        self.date_from.as_deref().is_none_or(|from| date >= from)
            && self.date_to.as_deref().is_none_or(|to| date <= to)
    }

    pub fn apply(&self, txns: &[Transaction]) -> Vec<Transaction> {
        txns.iter().filter(|t| self.matches(t)).cloned().collect()
    }

    /// Query-string pairs in the remote service's naming. Empty fields are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.file_ids.is_empty() {
            pairs.push(("file_ids", self.file_ids.join(",")));
        }
        if !self.exclude_categories.is_empty() {
            pairs.push(("exclude_categories", self.exclude_categories.join(",")));
        }
        if !self.exclude_sources.is_empty() {
            pairs.push(("exclude_sources", self.exclude_sources.join(",")));
        }
        if let Some(paid) = self.is_paid {
            pairs.push(("is_paid", paid.to_string()));
        }
        if let Some(from) = &self.date_from {
            pairs.push(("date_from", from.clone()));
        }
        if let Some(to) = &self.date_to {
            pairs.push(("date_to", to.clone()));
        }
        pairs
    }
}
