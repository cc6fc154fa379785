use std::fs;
use std::path::PathBuf;

use wydatki_core::{LedgerError, PreferenceStore, UserPreferences};

/// Preferences kept as pretty JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self) -> wydatki_core::Result<UserPreferences> {
        if !self.path.exists() {
            return Ok(UserPreferences::default());
        }
        let s = fs::read_to_string(&self.path)?;
        serde_json::from_str(&s).map_err(|e| {
            LedgerError::Preferences(format!("parse {}: {e}", self.path.display()))
        })
    }

    fn save(&self, prefs: &UserPreferences) -> wydatki_core::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(prefs)
            .map_err(|e| LedgerError::Preferences(e.to_string()))?;
        fs::write(&self.path, format!("{json}\n"))?;
        Ok(())
    }

    fn clear(&self) -> wydatki_core::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
