//! wydatki-stats: payment summary, category/source breakdowns and the
//! statistics provider contract.

pub mod aggregate;
pub mod provider;

pub use aggregate::{
    breakdown, group_by, group_by_category, group_by_source, group_by_source_with, payment_summary,
    top_category, top_n, Breakdown, UNKNOWN_SOURCE,
};
pub use provider::{LocalStats, StatsProvider};
