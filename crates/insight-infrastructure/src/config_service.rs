//! Configuration loading.
//!
//! Reads `config.toml` and applies environment overrides. A missing file is
//! not an error: every setting has a default.

use crate::paths::InsightPaths;
use insight_core::config::InsightConfig;
use insight_core::error::{InsightError, Result};
use std::path::{Path, PathBuf};

/// Overrides `service.endpoint`.
pub const ENV_ENDPOINT: &str = "INSIGHT_ENDPOINT";
/// Overrides `service.api_key`.
pub const ENV_API_KEY: &str = "INSIGHT_API_KEY";

/// Loads [`InsightConfig`] from a TOML file.
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the default location (`~/.config/insight/config.toml`).
    pub fn new() -> Result<Self> {
        let path = InsightPaths::default()
            .config_file()
            .map_err(|e| InsightError::config(format!("Failed to get config directory: {}", e)))?;
        Ok(Self { path })
    }

    /// Uses a specific file.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file (defaults if missing) and applies environment overrides.
    pub fn load(&self) -> Result<InsightConfig> {
        let config = self.load_file()?;
        Ok(apply_overrides(config, |key| std::env::var(key).ok()))
    }

    /// Loads the file only, without environment overrides.
    pub fn load_file(&self) -> Result<InsightConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file; using defaults");
            return Ok(InsightConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let config: InsightConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

fn apply_overrides<F>(mut config: InsightConfig, lookup: F) -> InsightConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
        config.service.endpoint = endpoint;
    }
    if let Some(api_key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
        config.service.api_key = Some(api_key);
    }
    config
}
