//! Clients for external services used by Insight.

pub mod analysis_api_client;

pub use analysis_api_client::AnalysisApiClient;
