//! Error types shared by the library crates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote statistics service failed or answered with an error body.
    #[error("remote service error: {0}")]
    Remote(String),

    #[error("preferences error: {0}")]
    Preferences(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Amount text that survived currency stripping but is not a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse amount {raw:?} (normalized to {cleaned:?})")]
pub struct NormalizeError {
    pub raw: String,
    pub cleaned: String,
}
