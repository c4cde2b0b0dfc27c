//! Research inputs and the bounded request payload built from them.

use crate::error::{InsightError, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of characters of a single document sent to the service.
pub const MAX_DOCUMENT_CHARS: usize = 50_000;

/// Maximum number of blog links and of product lines sent to the service.
pub const MAX_LIST_ENTRIES: usize = 10;

/// Appended to document content that was cut at [`MAX_DOCUMENT_CHARS`].
pub const TRUNCATION_MARKER: &str = "\n\n[... content truncated ...]";

/// A document supplied by the user, already converted to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub content: String,
    /// MIME type or short type label (e.g. `text/plain`, `pdf`).
    #[serde(rename = "type")]
    pub doc_type: String,
}

impl Document {
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        doc_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            doc_type: doc_type.into(),
        }
    }
}

/// Everything the user collected for one research submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInputSet {
    pub documents: Vec<Document>,
    pub blog_links: Vec<String>,
    pub product_lines: Vec<String>,
}

impl RawInputSet {
    /// Checks the submission invariant: at least one source (document or blog
    /// link) and at least one product line.
    pub fn validate(&self) -> Result<()> {
        if self.documents.is_empty() && self.blog_links.is_empty() {
            return Err(InsightError::invalid_input(
                "Add at least one document or blog link before submitting.",
            ));
        }
        if self.product_lines.is_empty() {
            return Err(InsightError::invalid_input(
                "Add at least one product line before submitting.",
            ));
        }
        Ok(())
    }
}

/// The size- and count-bounded body sent to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    pub documents: Vec<Document>,
    pub blog_links: Vec<String>,
    pub product_lines: Vec<String>,
}

/// Builds the request payload. Never fails; oversized inputs are cut silently.
pub fn build(input: &RawInputSet) -> RequestPayload {
    RequestPayload {
        documents: input.documents.iter().map(bound_document).collect(),
        blog_links: cap(&input.blog_links),
        product_lines: cap(&input.product_lines),
    }
}

fn bound_document(document: &Document) -> Document {
    Document {
        name: document.name.clone(),
        content: truncate_content(&document.content),
        doc_type: document.doc_type.clone(),
    }
}

/// Lengths are counted in chars so a cut never splits a UTF-8 sequence.
fn truncate_content(content: &str) -> String {
    match content.char_indices().nth(MAX_DOCUMENT_CHARS) {
        Some((byte_idx, _)) => {
            let mut truncated = String::with_capacity(byte_idx + TRUNCATION_MARKER.len());
            truncated.push_str(&content[..byte_idx]);
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => content.to_string(),
    }
}

fn cap(entries: &[String]) -> Vec<String> {
    entries.iter().take(MAX_LIST_ENTRIES).cloned().collect()
}
