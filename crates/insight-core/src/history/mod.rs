//! Research history domain module.
//!
//! - `model`: Saved research entry (`HistoryEntry`)
//! - `repository`: Repository trait for history persistence
//! - `reconcile`: Duplicate detection by company-name identity

mod model;
mod reconcile;
mod repository;

pub use model::HistoryEntry;
pub use reconcile::find_existing;
pub use repository::HistoryRepository;
