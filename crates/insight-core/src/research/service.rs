//! Analysis service trait.
//!
//! Defines the interface for submitting a research request to the external
//! analysis service.

use super::input::RequestPayload;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract client for the external analysis service.
///
/// Implementations perform a single request per call and return the raw
/// response body untouched; splitting and decoding happen in the pipeline.
///
/// # Errors
///
/// - `InsightError::RateLimited`: the service asked us to slow down
/// - `InsightError::Transport`: non-success status, timeout, or network failure
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Submits the payload and returns the response body text.
    async fn analyze(&self, payload: &RequestPayload) -> Result<String>;
}
