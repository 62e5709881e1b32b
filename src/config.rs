//! Configuration persistence.
//!
//! Saved as JSON to `<config_dir>/psrate/config.json` (e.g.
//! `~/.config/psrate/config.json` on Linux, `%APPDATA%/psrate` on Windows).

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("psrate").join("config.json"))
}

/// Persistable settings (subset of App state).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Interface name the user pinned, empty = automatic selection.
    pub pinned_interface: Option<String>,
    /// Minimum level for the Events tab: off/error/warn/info/debug/trace.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pinned_interface: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config from disk, returning defaults if the file is missing
    /// or unreadable.
    pub fn load() -> Self {
        let path = match config_path() {
            Some(p) => p,
            None => return Self::default(),
        };
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save config to disk, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = match config_path() {
            Some(p) => p,
            None => return Ok(()),
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let cfg = Config {
            pinned_interface: Some("wlp3s0".to_string()),
            log_level: "debug".to_string(),
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let back: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(back, Config::default());
        assert_eq!(back.log_level, "info");
    }
}
