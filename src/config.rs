//! Configuration for tinydb
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::catalog::MIN_DEVICE_LEN;
use crate::error::{Result, TinyDbError};

/// Largest device the 16-bit catalog fields can address
pub const MAX_DEVICE_LEN: usize = u16::MAX as usize + 1;

/// Main configuration for a tinydb instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Device Configuration
    // -------------------------------------------------------------------------
    /// Length of the persistent store in bytes
    /// Layout:
    ///   [0]            reserved
    ///   [1 ..)         row data, growing up
    ///   (.. N-7]       catalog records, growing down
    ///   [N-6 ..= N-2]  global header
    ///   [N-1]          reserved
    pub device_len: usize,

    /// Host file holding the device image (used by `FileDevice`)
    pub image_path: PathBuf,

    /// When to push device writes to the backing image
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------
    /// Trace the index cursor contents after every delete
    pub trace_index: bool,
}

/// Flush strategy for the storage device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// flush after every commit point (safest, slowest)
    EveryCommit,

    /// flush after N commit points
    EveryNCommits { count: usize },

    /// only flush on explicit `Database::sync` or drop
    Manual,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_len: 1024, // ATmega328P EEPROM
            image_path: PathBuf::from("./tinydb.eep"),
            sync_strategy: SyncStrategy::EveryCommit,
            trace_index: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the values that would otherwise fail deep inside the engine
    pub fn validate(&self) -> Result<()> {
        if self.device_len < MIN_DEVICE_LEN || self.device_len > MAX_DEVICE_LEN {
            return Err(TinyDbError::Config(format!(
                "device length {} outside {}..={}",
                self.device_len, MIN_DEVICE_LEN, MAX_DEVICE_LEN
            )));
        }

        if let SyncStrategy::EveryNCommits { count: 0 } = self.sync_strategy {
            return Err(TinyDbError::Config(
                "EveryNCommits requires a non-zero count".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the device length (in bytes)
    pub fn device_len(mut self, len: usize) -> Self {
        self.config.device_len = len;
        self
    }

    /// Set the image file path
    pub fn image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.image_path = path.into();
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Enable index cursor tracing
    pub fn trace_index(mut self, enabled: bool) -> Self {
        self.config.trace_index = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
