//! CLI configuration from `~/.taxui/config.toml`.
//!
//! A missing file means defaults — the tool works out of the box against a
//! local dev backend. A malformed file is a hard error carrying the path.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxuiConfig {
    /// Backend base URL for live queries
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Preference store location (defaults to the user config dir)
    #[serde(default)]
    pub prefs_path: Option<PathBuf>,
    /// Default log filter when RUST_LOG is unset
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for TaxuiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            prefs_path: None,
            log_level: None,
        }
    }
}

impl TaxuiConfig {
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".taxui").join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))
    }
}
