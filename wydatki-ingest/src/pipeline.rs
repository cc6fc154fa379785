//! Ledger CSV ingestion.
//!
//! Ledger exports have `skip_rows` metadata lines, then:
//! Rodzaj,Skąd,Co,Za ile,Opłacone?,Gotówka

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use wydatki_core::{FileRecord, Result, Transaction};

use crate::columns::{map_row, ColumnIndex, RowSkip};
use crate::layout::CsvLayout;

/// Row counts from one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub accepted: usize,
    pub blank: usize,
    pub no_amount: usize,
    pub bad_amount: usize,
    pub malformed: usize,
}

/// Turns export content into transactions owned by one file.
#[derive(Debug, Clone)]
pub struct Ingester {
    layout: CsvLayout,
    file_id: String,
}

impl Ingester {
    pub fn new(layout: CsvLayout, file_id: impl Into<String>) -> Self {
        Self {
            layout,
            file_id: file_id.into(),
        }
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    /// Read everything from `reader` and ingest it. Only a failed read is an
    /// error; rows that do not map are dropped.
    pub fn ingest<R: Read>(&self, mut reader: R) -> Result<Vec<Transaction>> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(self.ingest_bytes(&bytes).0)
    }

    pub fn ingest_bytes(&self, bytes: &[u8]) -> (Vec<Transaction>, IngestStats) {
        let text = String::from_utf8_lossy(bytes);
        self.ingest_str(&text)
    }

    pub fn ingest_str(&self, content: &str) -> (Vec<Transaction>, IngestStats) {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let table = skip_lines(content, self.layout.skip_rows);

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(table.as_bytes());

        let mut stats = IngestStats::default();
        let mut txns = Vec::new();
        let mut index: Option<ColumnIndex> = None;

        for (row, result) in rdr.records().enumerate() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    debug!(row, error = %e, "dropping malformed row");
                    stats.malformed += 1;
                    continue;
                }
            };

            let Some(columns) = index.as_ref() else {
                let resolved = ColumnIndex::resolve(&record, &self.layout.columns);
                let missing = resolved.missing();
                if !missing.is_empty() {
                    warn!(file_id = %self.file_id, ?missing, "header is missing expected columns");
                }
                index = Some(resolved);
                continue;
            };

            match map_row(&record, columns, &self.file_id) {
                Ok(txn) => {
                    stats.accepted += 1;
                    txns.push(txn);
                }
                Err(RowSkip::Blank) => stats.blank += 1,
                Err(RowSkip::NoAmount) => {
                    debug!(row, "dropping row without amount");
                    stats.no_amount += 1;
                }
                Err(RowSkip::BadAmount(e)) => {
                    debug!(row, error = %e, "dropping row with unparseable amount");
                    stats.bad_amount += 1;
                }
            }
        }

        info!(
            file_id = %self.file_id,
            accepted = stats.accepted,
            dropped = stats.blank + stats.no_amount + stats.bad_amount + stats.malformed,
            "ingested ledger export"
        );
        (txns, stats)
    }
}

/// Everything after the first `n` lines.
fn skip_lines(content: &str, n: usize) -> &str {
    if n == 0 {
        return content;
    }
    match content.match_indices('\n').nth(n - 1) {
        Some((pos, _)) => &content[pos + 1..],
        None => "",
    }
}

/// Ingest a file from disk under a fresh file id.
pub fn ingest_file(
    path: impl AsRef<Path>,
    layout: &CsvLayout,
) -> Result<(FileRecord, Vec<Transaction>)> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let ingester = Ingester::new(layout.clone(), Uuid::new_v4().to_string());
    let txns = ingester.ingest(file)?;

    let record = FileRecord {
        id: ingester.file_id().to_string(),
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        uploaded_at: Utc::now().timestamp(),
        transaction_count: Some(txns.len()),
    };
    Ok((record, txns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_lines() {
        assert_eq!(skip_lines("a\nb\nc\nd", 3), "d");
        assert_eq!(skip_lines("a\r\nb\r\nrest", 2), "rest");
        assert_eq!(skip_lines("a\nb", 5), "");
        assert_eq!(skip_lines("a\nb", 0), "a\nb");
    }

    #[test]
    fn test_preamble_is_never_a_header() {
        let content = "Rodzaj,Za ile\nx\ny\nRodzaj,Skąd,Co,Za ile\nDom,,,5\n";
        let (txns, _) = Ingester::new(CsvLayout::default(), "f").ingest_str(content);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].category, "Dom");
    }

    #[test]
    fn test_stats_count_drops() {
        let content = "\n\n\nRodzaj,Za ile\nA,1\n,\nB,abc\nC,zł\nD,2\n";
        let (txns, stats) = Ingester::new(CsvLayout::default(), "f").ingest_str(content);
        assert_eq!(txns.len(), 2);
        assert_eq!(
            stats,
            IngestStats {
                accepted: 2,
                blank: 1,
                no_amount: 1,
                bad_amount: 1,
                malformed: 0,
            }
        );
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let layout = CsvLayout {
            skip_rows: 0,
            ..Default::default()
        };
        let (txns, _) = Ingester::new(layout, "f").ingest_str("\u{feff}Rodzaj,Za ile\nDom,3\n");
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].category, "Dom");
    }
}
