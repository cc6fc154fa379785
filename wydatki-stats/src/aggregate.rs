//! Aggregations over a transaction list: payment summary and grouped totals.
//!
//! Every function takes the full input and returns fresh values. Nothing is
//! cached between calls.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use wydatki_core::{CategoryTotal, GroupTotal, PaymentSummary, SourceTotal, Transaction};

/// Grouping label for transactions with a blank source.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Paid/unpaid totals plus the cash subset, in one pass. Sums saturate at
/// `Decimal::MAX` instead of overflowing.
pub fn payment_summary(txns: &[Transaction]) -> PaymentSummary {
    let mut s = PaymentSummary::default();
    for t in txns {
        s.total_spent = s.total_spent.saturating_add(t.amount);
        if t.is_paid {
            s.paid_amount = s.paid_amount.saturating_add(t.amount);
            s.paid_count += 1;
        } else {
            s.unpaid_amount = s.unpaid_amount.saturating_add(t.amount);
            s.unpaid_count += 1;
        }
        if t.is_cash() {
            s.cash_amount = s.cash_amount.saturating_add(t.amount);
            s.cash_count += 1;
        }
    }
    s
}

/// Totals per key, largest total first. Equal totals keep the order in which
/// their keys first appeared. Percentages are shares of this input's total.
pub fn group_by<F>(txns: &[Transaction], key: F) -> Vec<GroupTotal>
where
    F: Fn(&Transaction) -> String,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<GroupTotal> = Vec::new();
    let mut grand_total = Decimal::ZERO;

    for t in txns {
        grand_total = grand_total.saturating_add(t.amount);
        let k = key(t);
        match slots.get(&k) {
            Some(&i) => {
                groups[i].total = groups[i].total.saturating_add(t.amount);
                groups[i].count += 1;
            }
            None => {
                slots.insert(k.clone(), groups.len());
                groups.push(GroupTotal {
                    key: k,
                    total: t.amount,
                    count: 1,
                    percentage: 0.0,
                });
            }
        }
    }

    for g in &mut groups {
        g.percentage = percentage(g.total, grand_total);
    }
    groups.sort_by(|a, b| b.total.cmp(&a.total));
    groups
}

fn percentage(part: Decimal, whole: Decimal) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    part.checked_div(whole)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|p| p.to_f64())
        .unwrap_or(0.0)
}

pub fn group_by_category(txns: &[Transaction]) -> Vec<CategoryTotal> {
    group_by(txns, |t| t.category.clone())
}

pub fn group_by_source(txns: &[Transaction]) -> Vec<SourceTotal> {
    group_by_source_with(txns, UNKNOWN_SOURCE)
}

/// Source totals with a custom label for blank sources.
pub fn group_by_source_with(txns: &[Transaction], unknown_label: &str) -> Vec<SourceTotal> {
    group_by(txns, |t| t.source_or(unknown_label).to_string())
}

/// The first `n` groups of an already sorted grouping.
pub fn top_n(groups: &[GroupTotal], n: usize) -> Vec<GroupTotal> {
    groups.iter().take(n).cloned().collect()
}

/// Largest category, `None` when there are no transactions.
pub fn top_category(txns: &[Transaction]) -> Option<CategoryTotal> {
    group_by_category(txns).into_iter().next()
}

/// Everything a dashboard shows for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub summary: PaymentSummary,
    pub categories: Vec<CategoryTotal>,
    pub sources: Vec<SourceTotal>,
    pub top_category: Option<CategoryTotal>,
}

pub fn breakdown(txns: &[Transaction], unknown_label: &str) -> Breakdown {
    let categories = group_by_category(txns);
    Breakdown {
        summary: payment_summary(txns),
        top_category: categories.first().cloned(),
        sources: group_by_source_with(txns, unknown_label),
        categories,
    }
}
