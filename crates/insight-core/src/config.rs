//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer; every field has a
//! default so a missing or partial file is valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoint used when no configuration overrides it.
pub const DEFAULT_ENDPOINT: &str = "https://api.insight-research.app/v1/analyze";

/// Default request timeout for a single analysis submission.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Root configuration.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct InsightConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Connection settings for the external analysis service.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Sent as a bearer token when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

/// Response handling settings.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AnalysisConfig {
    /// When true, a response with no decodable record is reported as
    /// `MalformedResponse` instead of yielding the fallback record.
    #[serde(default)]
    pub strict_parsing: bool,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
