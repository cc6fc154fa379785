//! Checks applied to candidate files before ingestion.

use std::path::Path;

/// Ledger exports are accepted by extension only: `.csv`, any case.
pub fn is_valid_csv_file_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".csv")
}

pub fn is_valid_csv_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(is_valid_csv_file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_check() {
        assert!(is_valid_csv_file_name("wydatki.csv"));
        assert!(is_valid_csv_file_name("Wydatki 2024.CSV"));
        assert!(!is_valid_csv_file_name("wydatki.xlsx"));
        assert!(!is_valid_csv_file_name("csv"));
        assert!(is_valid_csv_path(Path::new("/tmp/maj.csv")));
        assert!(!is_valid_csv_path(Path::new("/tmp/")));
    }
}
