//! Configuration management for the RAX FAT store
//!
//! Values come from built-in defaults, an optional `config.toml` in the working
//! directory, and `RAX_FAT_*` environment variables, in that order.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_BLOCK_SIZE: usize = 20;
pub const DEFAULT_ADMIN_USER: &str = "admin";
pub const DEFAULT_DATA_ROOT: &str = "fat_store";

/// Store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Directory holding the `fat/`, `blocks/` and `users.json` records
    /// Environment: RAX_FAT_DATA_ROOT
    pub data_root: String,

    /// Maximum characters per data block
    /// Environment: RAX_FAT_BLOCK_SIZE
    pub block_size: usize,

    /// Administrator identity, always registered
    /// Environment: RAX_FAT_ADMIN_USER
    pub admin_user: String,

    /// Write records to `data_root`; when false everything stays in memory
    /// Environment: RAX_FAT_PERSIST
    pub persist: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_root: DEFAULT_DATA_ROOT.to_string(),
            block_size: DEFAULT_BLOCK_SIZE,
            admin_user: DEFAULT_ADMIN_USER.to_string(),
            persist: true,
        }
    }
}

impl StoreConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the given file stem (the file is optional)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .set_default("data_root", DEFAULT_DATA_ROOT)?
            .set_default("block_size", DEFAULT_BLOCK_SIZE as i64)?
            .set_default("admin_user", DEFAULT_ADMIN_USER)?
            .set_default("persist", true)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("RAX_FAT").try_parsing(true))
            .build()?;

        let mut config: StoreConfig = settings.try_deserialize()?;
        config.admin_user = config.admin_user.trim().to_lowercase();
        config.validate()?;
        Ok(config)
    }

    /// In-memory configuration with the given block size
    pub fn volatile(block_size: usize) -> Self {
        Self {
            block_size,
            persist: false,
            ..Self::default()
        }
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.block_size == 0 {
            return Err(config::ConfigError::Message(
                "block_size must be greater than 0".into(),
            ));
        }

        if self.data_root.is_empty() {
            return Err(config::ConfigError::Message(
                "data_root cannot be empty".into(),
            ));
        }

        if self.admin_user.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "admin_user cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Get data root as PathBuf
    pub fn data_root_path(&self) -> PathBuf {
        PathBuf::from(&self.data_root)
    }
}
