//! Storage layer for file-backed persistence.

pub mod atomic_json;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
