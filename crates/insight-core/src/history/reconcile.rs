//! Matching a fresh result set against saved history.

use super::model::HistoryEntry;
use crate::research::AnalysisRecord;

/// Returns the id of the first history entry describing the same companies.
///
/// Two result sets match when their company names, sorted and compared
/// case-sensitively, are equal. Duplicates are kept, so `["Acme", "Acme"]`
/// does not match `["Acme"]`.
pub fn find_existing<'a>(
    current: &[AnalysisRecord],
    history: &'a [HistoryEntry],
) -> Option<&'a str> {
    let key = identity_key(current.iter().map(|r| r.company_name.as_str()));

    history
        .iter()
        .find(|entry| identity_key(entry.data.iter().map(|r| r.company_name.as_str())) == key)
        .map(|entry| entry.id.as_str())
}

fn identity_key<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut names: Vec<&str> = names.collect();
    names.sort_unstable();
    names
}
