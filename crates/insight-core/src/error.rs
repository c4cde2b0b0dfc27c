//! Error types for the Insight application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Insight application.
///
/// Variants are grouped by cause so that callers can pick a retry strategy:
/// transport problems (rate limiting, non-success status, network failures),
/// response problems (nothing decodable), and persistence problems.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum InsightError {
    /// The analysis service rejected the request because of rate limiting.
    #[error("Rate limited by analysis service: {message}")]
    RateLimited {
        retry_after_secs: Option<u64>,
        message: String,
    },

    /// Transport failure: non-success status, timeout, or network error.
    #[error("Transport error{}: {message}", status_suffix(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// The analysis service replied, but nothing in the body could be decoded.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The research inputs do not satisfy the submission invariant.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A submission is already outstanding.
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// No authenticated session is present.
    #[error("Not signed in")]
    Unauthenticated,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl InsightError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// Creates a RateLimited error
    pub fn rate_limited(retry_after_secs: Option<u64>, message: impl Into<String>) -> Self {
        Self::RateLimited {
            retry_after_secs,
            message: message.into(),
        }
    }

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a rate limiting error
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Check if this error came from talking to the analysis service.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::RateLimited { .. })
    }

    /// Check if this error came from the persistence layer.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::DataAccess(_) | Self::Io { .. } | Self::NotFound { .. } | Self::Serialization { .. }
        )
    }

    /// Returns a single actionable message for the user, distinguishable by cause.
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited {
                retry_after_secs: Some(secs),
                ..
            } => format!(
                "The analysis service is busy. Please wait {secs} seconds and try again."
            ),
            Self::RateLimited { .. } => {
                "The analysis service is busy. Please wait a moment and try again.".to_string()
            }
            Self::Transport { .. } => {
                "Could not reach the analysis service. Check your connection and try again."
                    .to_string()
            }
            Self::MalformedResponse(_) => {
                "The analysis service returned a response that could not be read. Try submitting again."
                    .to_string()
            }
            Self::InvalidInput(message) => message.clone(),
            Self::SubmissionInProgress => {
                "An analysis is already running. Wait for it to finish.".to_string()
            }
            Self::Unauthenticated => "Please sign in to continue.".to_string(),
            Self::NotFound { .. }
            | Self::Io { .. }
            | Self::DataAccess(_)
            | Self::Serialization { .. } => {
                "Could not update your saved research. Your changes were not applied.".to_string()
            }
            Self::Config(message) => format!("Configuration problem: {message}"),
            Self::Internal(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for InsightError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for InsightError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for InsightError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for InsightError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|code| format!(" (status {code})")).unwrap_or_default()
}

/// A type alias for `Result<T, InsightError>`.
pub type Result<T> = std::result::Result<T, InsightError>;
