//! Console/service configuration, read from TOML.
//!
//! ```toml
//! room_code_length = 6
//! log_level = "info"
//!
//! [storage]
//! kind = "directory"
//! path = "games"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::RoomResult;
use crate::store::{GameStore, JsonDirStore, MemoryStore};

/// Where games are kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageConfig {
    Memory,
    Directory { path: PathBuf },
}

/// Service configuration. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub storage: StorageConfig,
    /// Letters in a generated room code
    pub room_code_length: usize,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::Memory,
            room_code_length: 6,
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn from_toml_str(text: &str) -> RoomResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> RoomResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Open the configured store.
    pub fn open_store(&self) -> RoomResult<Box<dyn GameStore>> {
        Ok(match &self.storage {
            StorageConfig::Memory => Box::new(MemoryStore::new()),
            StorageConfig::Directory { path } => Box::new(JsonDirStore::open(path)?),
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
