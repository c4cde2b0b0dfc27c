//! History repository trait.
//!
//! Defines the interface for research history persistence operations.

use super::model::HistoryEntry;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for saved research results.
///
/// This trait decouples the research flow from the specific storage
/// mechanism (JSON file, database, remote API).
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Lists all saved entries, most recent first.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<HistoryEntry>)`: All stored entries
    /// - `Err(_)`: Error occurred during listing
    async fn list_results(&self) -> Result<Vec<HistoryEntry>>;

    /// Deletes an entry by id.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Entry deleted
    /// - `Err(InsightError::NotFound)`: No entry with that id
    /// - `Err(_)`: Error occurred during deletion
    async fn delete_result(&self, id: &str) -> Result<()>;

    /// Inserts the entry, or replaces the stored entry with the same id.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Entry saved
    /// - `Err(_)`: Error occurred during save
    async fn save_or_update(&self, entry: &HistoryEntry) -> Result<()>;
}
