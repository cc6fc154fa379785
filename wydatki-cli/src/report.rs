//! Plain-text rendering for the terminal.

use rust_decimal::Decimal;
use wydatki_core::{format_amount, GroupTotal, PaymentSummary, Transaction};
use wydatki_stats::{top_n, Breakdown};

fn money(amount: Decimal) -> String {
    format_amount(amount, "")
}

pub fn render_transactions(txns: &[Transaction]) -> String {
    let mut out = String::new();
    for t in txns {
        out.push_str(&format!(
            "{:<16} | {:<14} | {:<28} | {:>14} | {} {}\n",
            t.category,
            t.source,
            t.description,
            format_amount(t.amount, &t.amount_original),
            if t.is_paid { "paid  " } else { "unpaid" },
            if t.is_cash() { "cash" } else { "" },
        ));
    }
    out.push_str(&format!("\n{} transactions\n", txns.len()));
    out
}

pub fn render_summary(s: &PaymentSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total spent:  {}\n", money(s.total_spent)));
    out.push_str(&format!("Paid:         {} ({})\n", money(s.paid_amount), s.paid_count));
    out.push_str(&format!("Unpaid:       {} ({})\n", money(s.unpaid_amount), s.unpaid_count));
    out.push_str(&format!("Cash:         {} ({})\n", money(s.cash_amount), s.cash_count));
    out
}

pub fn render_groups(title: &str, groups: &[GroupTotal], limit: usize) -> String {
    let mut out = format!("{title}\n");
    if groups.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }
    for g in top_n(groups, limit) {
        out.push_str(&format!(
            "  {:<20} {:>16} {:>6.1}%  count={}\n",
            g.key,
            money(g.total),
            g.percentage,
            g.count
        ));
    }
    if groups.len() > limit {
        out.push_str(&format!("  ... {} more\n", groups.len() - limit));
    }
    out
}

pub fn render_breakdown(b: &Breakdown, limit: usize) -> String {
    let mut out = render_summary(&b.summary);
    match &b.top_category {
        Some(top) => out.push_str(&format!("Top category: {} ({:.1}%)\n", top.key, top.percentage)),
        None => out.push_str("Top category: -\n"),
    }
    out.push('\n');
    out.push_str(&render_groups(&format!("Top {limit} categories"), &b.categories, limit));
    out.push('\n');
    out.push_str(&render_groups(&format!("Top {limit} sources"), &b.sources, limit));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wydatki_stats::{breakdown, UNKNOWN_SOURCE};

    fn group(key: &str, total: i64, pct: f64) -> GroupTotal {
        GroupTotal {
            key: key.into(),
            total: Decimal::new(total, 0),
            count: 1,
            percentage: pct,
        }
    }

    #[test]
    fn test_groups_are_cut_at_limit() {
        let groups = vec![group("Dom", 300, 75.0), group("Auto", 100, 25.0)];
        let text = render_groups("Kategorie", &groups, 1);
        assert!(text.contains("Dom"));
        assert!(text.contains("75.0%"));
        assert!(!text.contains("Auto"));
        assert!(text.contains("1 more"));
    }

    #[test]
    fn test_groups_within_limit_list_everything() {
        let groups = vec![group("Dom", 300, 75.0), group("Auto", 100, 25.0)];
        let text = render_groups("Kategorie", &groups, 5);
        assert!(text.contains("Dom"));
        assert!(text.contains("Auto"));
        assert!(!text.contains("more"));
    }

    #[test]
    fn test_empty_breakdown() {
        let text = render_breakdown(&breakdown(&[], UNKNOWN_SOURCE), 5);
        assert!(text.contains("Total spent:  0,00 zł"));
        assert!(text.contains("Top category: -"));
        assert!(text.contains("(no data)"));
    }
}
