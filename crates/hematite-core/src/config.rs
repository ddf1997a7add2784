//! Layout configuration loaded from JSON.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::button::ButtonSpec;
use crate::keys::ShortcutTable;
use crate::panel::PanelOptions;
use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageResult};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty shortcut symbol at position {0}")]
    EmptyShortcut(usize),
    #[error("Duplicate shortcut symbol: {0}")]
    DuplicateShortcut(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

fn default_shortcuts() -> Vec<String> {
    ShortcutTable::sidebar().symbols().to_vec()
}

/// Sidebar layout: shortcut symbols by position and the buttons in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarConfig {
    #[serde(default = "default_shortcuts")]
    pub shortcuts: Vec<String>,
    #[serde(default)]
    pub buttons: Vec<ButtonSpec>,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            shortcuts: default_shortcuts(),
            buttons: Vec::new(),
        }
    }
}

impl SidebarConfig {
    pub fn shortcut_table(&self) -> ShortcutTable {
        ShortcutTable::new(self.shortcuts.iter().cloned())
    }
}

/// Where panel positions are persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backing file. `None` uses the platform data directory.
    pub path: Option<PathBuf>,
    /// Keep positions in memory only.
    pub in_memory: bool,
}

impl StorageConfig {
    /// Open the configured store.
    pub fn open(&self) -> StorageResult<Box<dyn KeyValueStore>> {
        if self.in_memory {
            return Ok(Box::new(MemoryStore::new()));
        }
        let store = match &self.path {
            Some(path) => FileStore::open(path.clone())?,
            None => FileStore::default_location()?,
        };
        log::debug!("Panel positions stored in {}", store.path().display());
        Ok(Box::new(store))
    }
}

/// Complete layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HematiteConfig {
    pub sidebar: SidebarConfig,
    pub panels: Vec<PanelOptions>,
    pub storage: StorageConfig,
}

impl HematiteConfig {
    /// Parse and validate a JSON layout.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a layout file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Reject empty or repeated shortcut symbols. Symbols compare
    /// case-insensitively, like key matching does.
    ///
    /// Repeated button names are allowed and only logged.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::new();
        for (position, symbol) in self.sidebar.shortcuts.iter().enumerate() {
            if symbol.trim().is_empty() {
                return Err(ConfigError::EmptyShortcut(position));
            }
            if !seen.insert(symbol.to_ascii_lowercase()) {
                return Err(ConfigError::DuplicateShortcut(symbol.clone()));
            }
        }

        let mut names = HashSet::new();
        for spec in &self.sidebar.buttons {
            if !names.insert(spec.name.as_str()) {
                log::warn!("Button name {:?} is used more than once", spec.name);
            }
        }
        Ok(())
    }
}
