//! Client-side preference storage.
//!
//! The pages persist exactly one preference: whether the dashboard shows
//! associations that are not being filed. Components receive a
//! [`PreferenceStore`] at construction instead of reaching for ambient
//! browser storage, so tests and simulations can swap in memory or no-op
//! implementations.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{Result, UiError};

/// The dashboard show-all flag. Stored as `"true"`/`"false"` strings.
pub const SHOW_ALL_ASSOCIATIONS: &str = "show_all_associations";

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// An absent flag counts as true: rows are shown until the user opts out.
pub fn show_all_associations(store: &dyn PreferenceStore) -> bool {
    store.get(SHOW_ALL_ASSOCIATIONS).as_deref() != Some("false")
}

/// In-memory store for tests and simulations.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store that remembers nothing, for pages that must not persist state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl PreferenceStore for NoopStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }
}

/// A JSON map on disk, written through on every set.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// and its parent directory are created on first write.
    pub fn open(path: PathBuf) -> Result<Self> {
        let values = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| UiError::prefs(format!("{}: {e}", path.display())))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, values })
    }

    /// Default location: `{config_dir}/taxui/prefs.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taxui").join("prefs.json"))
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.values)
            .map_err(|e| UiError::prefs(e.to_string()))?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }
}
