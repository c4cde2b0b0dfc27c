//! Splitting and decoding of the analysis service's response body.
//!
//! The service answers with several JSON documents glued together by a fixed
//! delimiter, each one possibly wrapped in markdown code fences. Fragments are
//! decoded independently: a malformed fragment is logged and dropped without
//! affecting its siblings.

use serde_json::Value;

/// Literal separator between documents in the response body.
pub const FRAGMENT_DELIMITER: &str = "------------------------";

const OPENING_FENCE: &str = "```json";
const CLOSING_FENCE: &str = "```";

/// Splits the body on [`FRAGMENT_DELIMITER`]. Empty fragments are kept.
pub fn split(response: &str) -> Vec<&str> {
    response.split(FRAGMENT_DELIMITER).collect()
}

/// Removes code-fence noise and surrounding whitespace.
pub fn sanitize(fragment: &str) -> String {
    // The opening marker contains the closing one, so it goes first.
    fragment
        .replace(OPENING_FENCE, "")
        .replace(CLOSING_FENCE, "")
        .trim()
        .to_string()
}

/// Decodes a single fragment, returning `None` when it is not valid JSON.
pub fn parse_fragment(fragment: &str) -> Option<Value> {
    let cleaned = sanitize(fragment);
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                error = %e,
                fragment_len = fragment.len(),
                "Dropping response fragment that is not valid JSON"
            );
            None
        }
    }
}

/// Decodes every fragment, keeping only the ones that parsed.
pub fn parse_all(fragments: &[&str]) -> Vec<Value> {
    let values: Vec<Value> = fragments
        .iter()
        .filter_map(|fragment| parse_fragment(fragment))
        .collect();

    tracing::debug!(
        fragments = fragments.len(),
        decoded = values.len(),
        "Parsed analysis response fragments"
    );

    values
}
