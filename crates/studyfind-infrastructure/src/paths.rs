//! Unified path management for studyfind files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/studyfind/          # Config directory
//! ├── config.toml               # Application configuration
//! └── logs/                     # Rolling log files
//!     └── studyfind.log.YYYY-MM-DD
//!
//! ~/.local/share/studyfind/     # Data directory (file store backend)
//! └── userData/
//!     └── <uid>/
//!         └── todoList.toml
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "studyfind";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for studyfind_core::StudyError {
    fn from(err: PathError) -> Self {
        studyfind_core::StudyError::config(err.to_string())
    }
}

/// Platform-specific locations, resolved via the `dirs` crate.
pub struct StudyfindPaths;

impl StudyfindPaths {
    /// Returns the studyfind configuration directory (e.g. `~/.config/studyfind/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the studyfind data directory (e.g. `~/.local/share/studyfind/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}
