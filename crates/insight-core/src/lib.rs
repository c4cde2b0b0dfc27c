pub mod auth;
pub mod config;
pub mod error;
pub mod history;
pub mod research;
pub mod view;

// Re-export common error type
pub use error::InsightError;
