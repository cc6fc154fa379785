//! User preferences and the storage capability that persists them.
//!
//! Nothing in the library reads a store on its own; callers load the
//! preferences and hand the relevant values to filtering and aggregation.

use std::collections::HashSet;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::filter::TransactionFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Spending,
    Funding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Value,
    Percent,
}

/// Missing fields fall back to their defaults, so files written by older
/// versions still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub selected_file_ids: Vec<String>,
    pub excluded_categories: Vec<String>,
    pub excluded_sources: Vec<String>,
    pub table_page_size: usize,
    pub default_chart_type: ChartType,
    pub default_display_mode: DisplayMode,
    pub file_selector_expanded: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            selected_file_ids: Vec::new(),
            excluded_categories: Vec::new(),
            excluded_sources: Vec::new(),
            table_page_size: 50,
            default_chart_type: ChartType::Spending,
            default_display_mode: DisplayMode::Value,
            file_selector_expanded: true,
        }
    }
}

impl UserPreferences {
    pub fn has_active_filters(&self) -> bool {
        !self.excluded_categories.is_empty() || !self.excluded_sources.is_empty()
    }

    pub fn excluded_category_set(&self) -> HashSet<String> {
        self.excluded_categories.iter().cloned().collect()
    }

    pub fn excluded_source_set(&self) -> HashSet<String> {
        self.excluded_sources.iter().cloned().collect()
    }

    /// Filter equivalent of the stored selection and exclusions.
    pub fn to_filter(&self) -> TransactionFilter {
        TransactionFilter {
            file_ids: self.selected_file_ids.clone(),
            exclude_categories: self.excluded_categories.clone(),
            exclude_sources: self.excluded_sources.clone(),
            ..Default::default()
        }
    }
}

/// Somewhere preferences live between runs.
pub trait PreferenceStore {
    /// Stored preferences, or defaults when nothing has been saved.
    fn load(&self) -> Result<UserPreferences>;
    fn save(&self, prefs: &UserPreferences) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Process-local store, mostly for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Option<UserPreferences>>,
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<UserPreferences> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| LedgerError::Preferences(e.to_string()))?;
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, prefs: &UserPreferences) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| LedgerError::Preferences(e.to_string()))?;
        *guard = Some(prefs.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| LedgerError::Preferences(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}
