//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the application
//! configuration from the configuration file
//! (~/.config/studyfind/config.toml).

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use studyfind_core::config::AppConfig;
use studyfind_core::error::Result;

use crate::paths::StudyfindPaths;
use crate::storage::AtomicTomlFile;

/// Configuration service that loads and caches the application configuration.
///
/// A missing file is created with the defaults on first load, so users have
/// something to edit.
#[derive(Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service for the default config path.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(StudyfindPaths::config_file()?))
    }

    /// Creates a service for a custom config path (for testing or `--config`).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn load(&self) -> Result<AppConfig> {
        {
            let cached = self
                .config
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let file = AtomicTomlFile::<AppConfig>::new(self.path.clone());
        let loaded = match file.load()? {
            Some(config) => config,
            None => {
                let config = AppConfig::default();
                file.save(&config)?;
                tracing::info!("Wrote default configuration to {}", self.path.display());
                config
            }
        };

        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    /// Base directory of the file store: configured value or platform default.
    pub fn data_dir(config: &AppConfig) -> Result<PathBuf> {
        match &config.store.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(StudyfindPaths::data_dir()?),
        }
    }

    /// Directory of the rolling log files: configured value or platform default.
    pub fn log_dir(config: &AppConfig) -> Result<PathBuf> {
        match &config.logging.directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(StudyfindPaths::logs_dir()?),
        }
    }
}
