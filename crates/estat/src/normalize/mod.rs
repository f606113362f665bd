//! Normalization pipeline turning raw e-Stat envelopes into tool output.
//!
//! Each of the four envelope shapes has exactly one entry point here. The
//! pipeline is pure and synchronous: it performs no I/O, holds no state
//! across calls, and expresses every outcome (including upstream errors)
//! as a returned value.

pub mod catalog;
pub mod group;

mod data;
mod list;
mod meta;

pub use catalog::{resolve_value, ClassificationCatalog, CodeMap, ResolvedValue};
pub use data::normalize_data;
pub use group::{group_values, AttributeTree};
pub use list::{
    group_surveys, group_tables, normalize_survey_list, normalize_table_list, SurveyEntry,
    SurveyGroups, TableEntry, TableGroups,
};
pub use meta::normalize_metadata;

use serde_json::Value;

/// Text emitted when an otherwise successful response carries no rows.
const NO_DATA: &str = "No data found.";

/// One unit of tool output.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Plain text, rendered verbatim.
    Text(String),
    /// Structured payload, rendered as pretty-printed JSON.
    Json(Value),
}

/// Normalized result of one upstream response.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResponse {
    /// Mirrors the upstream error status.
    pub is_error: bool,
    /// Output segments in presentation order.
    pub segments: Vec<Segment>,
}

impl NormalizedResponse {
    fn ok(segments: Vec<Segment>) -> Self {
        Self {
            is_error: false,
            segments,
        }
    }

    /// Upstream reported a non-zero status: its message is the sole output.
    fn upstream_error(message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            segments: vec![Segment::Text(message.into())],
        }
    }

    /// Success status but nothing to show. Not an error.
    fn no_data() -> Self {
        Self::ok(vec![Segment::Text(NO_DATA.to_string())])
    }
}

/// Continuation hint for truncated, paginated responses.
///
/// Applied uniformly to the table list, survey list and data responses;
/// metadata responses carry no pagination.
fn continuation_hint(next_key: Option<u32>) -> Option<Segment> {
    next_key.map(|position| {
        Segment::Text(format!(
            "...data truncated. The request with 'startPosition = {position}' will receive the rest."
        ))
    })
}
