//! Typed record schemas for the two collections the service retrieves from.
//!
//! The dataset JSON keeps the column names of the upstream sources, so the
//! serde renames below are the contract with the offline embedding jobs.

pub mod course;
pub mod job;

pub use course::Course;
pub use job::Job;

/// A record kind that can be indexed, ranked and deduplicated.
pub trait Document {
    /// Candidate multiplier applied to `top_k` before deduplication.
    const OVER_FETCH_FACTOR: usize;

    /// Value used to collapse near-duplicate records after ranking.
    /// Records with a missing key all share the empty key.
    fn dedupe_key(&self) -> &str;

    /// Text projection fed into the lexical index.
    fn lexical_text(&self) -> String;
}

/// Returns the field value if it carries any non-whitespace content.
pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.trim().is_empty())
}
