use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use wydatki_ingest::CsvLayout;
use wydatki_stats::UNKNOWN_SOURCE;

use crate::state::ensure_wydatki_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub csv: CsvLayout,
    pub remote: RemoteSection,
    pub report: ReportSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSection {
    /// Statistics service root, e.g. `http://localhost:8080/api`
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// How many categories/sources the text report lists
    pub top_n: usize,
    pub unknown_source_label: String,
}

impl Default for RemoteSection {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            top_n: 5,
            unknown_source_label: UNKNOWN_SOURCE.to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_wydatki_home()?.join("config.toml"))
}

/// Config from `~/.wydatki/config.toml` (defaults when missing), with
/// `WYDATKI_API_URL` taking precedence for the remote URL.
pub fn load_config() -> Result<Config> {
    let mut cfg = read_config(&config_path()?)?;
    if let Ok(url) = std::env::var("WYDATKI_API_URL") {
        if !url.trim().is_empty() {
            cfg.remote.base_url = url;
        }
    }
    Ok(cfg)
}

pub fn read_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
