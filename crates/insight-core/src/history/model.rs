//! History domain model.

use crate::research::AnalysisRecord;
use serde::{Deserialize, Serialize};

/// A saved research result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Human-readable title shown in the history list
    pub title: String,
    /// The analysis records, in the order the service returned them
    pub data: Vec<AnalysisRecord>,
    /// Timestamp of creation (ISO 8601 format)
    pub created_at: String,
    /// Timestamp of the last update (ISO 8601 format)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl HistoryEntry {
    /// Company names of the stored records, in stored order.
    pub fn company_names(&self) -> Vec<&str> {
        self.data.iter().map(|r| r.company_name.as_str()).collect()
    }
}
