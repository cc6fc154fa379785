use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$WYDATKI_HOME`, or `~/.wydatki`.
pub fn wydatki_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("WYDATKI_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".wydatki"))
}

pub fn ensure_wydatki_home() -> Result<PathBuf> {
    let dir = wydatki_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn prefs_path() -> Result<PathBuf> {
    Ok(ensure_wydatki_home()?.join("preferences.json"))
}
