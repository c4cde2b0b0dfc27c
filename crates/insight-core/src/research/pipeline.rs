//! Response ingestion: split, decode, normalize.

use super::analysis::{NormalizedResults, normalize};
use super::response::{parse_all, split};

/// Turns a raw response body into a non-empty list of analysis records.
///
/// Never fails. A body with no decodable analysis yields the fallback record
/// with `degraded` set.
pub fn ingest(response: &str) -> NormalizedResults {
    let fragments = split(response);
    let values = parse_all(&fragments);
    normalize(values)
}
