//! wydatki-core: ledger record types, amount normalization, status markers
//! and transaction filters.

pub mod amount;
pub mod date;
pub mod error;
pub mod filter;
pub mod model;
pub mod prefs;
pub mod status;
pub mod table;

pub use amount::{format_amount, normalize, MAX_AMOUNT};
pub use error::{LedgerError, NormalizeError, Result};
pub use filter::{exclude, TransactionFilter};
pub use model::{CategoryTotal, FileRecord, GroupTotal, PaymentSummary, SourceTotal, Transaction};
pub use prefs::{MemoryStore, PreferenceStore, UserPreferences};
pub use status::{is_truthy, parse_paid};
pub use table::{filter_by_category, sort_transactions, SortColumn, SortDirection};
