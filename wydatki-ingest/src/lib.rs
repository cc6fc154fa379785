//! wydatki-ingest: ledger export ingestion (preamble skipping, header
//! discovery, row mapping).

pub mod columns;
pub mod layout;
pub mod pipeline;
pub mod validate;

pub use columns::{map_row, ColumnIndex, RowSkip};
pub use layout::{Column, ColumnNames, CsvLayout};
pub use pipeline::{ingest_file, IngestStats, Ingester};
pub use validate::is_valid_csv_file_name;
