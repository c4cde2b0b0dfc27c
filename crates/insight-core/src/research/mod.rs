//! Research domain module.
//!
//! Everything between the user's collected inputs and a renderable list of
//! analysis records.
//!
//! # Module Structure
//!
//! - `input`: Research inputs and the bounded request payload (`build`)
//! - `response`: Response splitting and per-fragment decoding
//! - `analysis`: Canonical `AnalysisRecord` and the normalizer
//! - `pipeline`: `ingest`, the composition of the three stages above
//! - `service`: Trait for the external analysis service
//! - `guard`: Single-flight submission guard

mod analysis;
mod guard;
mod input;
mod pipeline;
mod response;
mod service;

pub use analysis::{
    AnalysisRecord, FALLBACK_COMPANY_NAME, FALLBACK_MARKER, NormalizedResults, RAW_VALUE_FIELD,
    UNKNOWN_COMPANY, normalize,
};
pub use guard::{SubmissionGuard, SubmissionTicket};
pub use input::{
    Document, MAX_DOCUMENT_CHARS, MAX_LIST_ENTRIES, RawInputSet, RequestPayload,
    TRUNCATION_MARKER, build,
};
pub use pipeline::ingest;
pub use response::{FRAGMENT_DELIMITER, parse_all, parse_fragment, sanitize, split};
pub use service::AnalysisService;
