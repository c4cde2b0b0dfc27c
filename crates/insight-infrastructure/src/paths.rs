//! Unified path management for insight configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/insight/           # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/insight/      # Data directory
//! └── history.json             # Saved research results
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "insight";

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

/// Resolves insight's files, optionally under a custom base (for testing).
///
/// With a base directory, both config and data live directly under it.
#[derive(Debug, Clone, Default)]
pub struct InsightPaths {
    base_dir: Option<PathBuf>,
}

impl InsightPaths {
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory (e.g. `~/.config/insight/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g. `~/.local/share/insight/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn history_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("history.json"))
    }
}
