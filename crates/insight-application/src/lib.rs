//! Application layer for Insight.
//!
//! This crate provides use case implementations that coordinate between
//! domain and infrastructure layers to implement application-level business logic.

pub mod research_usecase;

pub use research_usecase::{ResearchSnapshot, ResearchUseCase, SaveOutcome, SubmissionOutcome};
