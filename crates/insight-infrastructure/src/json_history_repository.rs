//! JSON file-backed HistoryRepository implementation.

use crate::paths::InsightPaths;
use crate::storage::{AtomicJsonError, AtomicJsonFile};
use async_trait::async_trait;
use insight_core::error::{InsightError, Result};
use insight_core::history::{HistoryEntry, HistoryRepository};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk layout of `history.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    entries: Vec<HistoryEntry>,
}

/// Stores all history entries in a single JSON file.
///
/// ```text
/// data_dir/
/// └── history.json   { "entries": [ { "id": ..., "title": ..., "data": [...] } ] }
/// ```
///
/// Blocking file I/O runs on tokio's blocking pool.
pub struct JsonHistoryRepository {
    path: PathBuf,
}

impl JsonHistoryRepository {
    /// Creates a repository at the default location (`~/.local/share/insight/history.json`).
    pub fn default_location() -> Result<Self> {
        let path = InsightPaths::default()
            .history_file()
            .map_err(|e| InsightError::config(format!("Failed to get data directory: {}", e)))?;
        Ok(Self::with_path(path))
    }

    /// Creates a repository backed by a specific file (for testing).
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn run_blocking<R, F>(&self, op: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(AtomicJsonFile<HistoryFile>) -> Result<R> + Send + 'static,
    {
        let file = AtomicJsonFile::new(self.path.clone());
        tokio::task::spawn_blocking(move || op(file))
            .await
            .map_err(|e| InsightError::internal(format!("History storage task failed: {}", e)))?
    }
}

fn storage_error(context: &str, err: AtomicJsonError) -> InsightError {
    InsightError::data_access(format!("{}: {}", context, err))
}

#[async_trait]
impl HistoryRepository for JsonHistoryRepository {
    async fn list_results(&self) -> Result<Vec<HistoryEntry>> {
        let mut entries = self
            .run_blocking(|file| {
                file.load()
                    .map(|loaded| loaded.unwrap_or_default().entries)
                    .map_err(|e| storage_error("Failed to load history", e))
            })
            .await?;

        // Most recent first
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    async fn delete_result(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        let removed = self
            .run_blocking(move |file| {
                file.update(HistoryFile::default(), |history| {
                    let before = history.entries.len();
                    history.entries.retain(|entry| entry.id != id);
                    if history.entries.len() == before {
                        return Err(AtomicJsonError::Rejected(id.clone()));
                    }
                    Ok(id.clone())
                })
                .map_err(|e| match e {
                    AtomicJsonError::Rejected(id) => InsightError::not_found("history entry", id),
                    other => storage_error("Failed to delete history entry", other),
                })
            })
            .await?;

        tracing::debug!(id = %removed, "Deleted history entry");
        Ok(())
    }

    async fn save_or_update(&self, entry: &HistoryEntry) -> Result<()> {
        let entry = entry.clone();
        self.run_blocking(move |file| {
            file.update(HistoryFile::default(), |history| {
                match history.entries.iter_mut().find(|e| e.id == entry.id) {
                    Some(existing) => *existing = entry,
                    None => history.entries.push(entry),
                }
                Ok(())
            })
            .map_err(|e| storage_error("Failed to save history entry", e))
        })
        .await
    }
}
