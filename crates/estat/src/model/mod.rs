//! Typed models of the e-Stat XML response envelopes.
//!
//! Field names mirror the upstream documents (`GET_STATS_LIST`,
//! `GET_META_INFO`, `GET_STATS_DATA`); attributes map with a `@` prefix and
//! element text with `$text`, per quick-xml's serde conventions. Elements
//! the pipeline never consumes are left unmodeled and skipped during
//! deserialization.

mod data;
mod list;
mod meta;

pub use data::{Annotation, DataInf, Note, StatisticalData, StatsDataResponse, ValueCell};
pub use list::{DataListInf, ListInf, StatsListResponse, TableInf, Title};
pub use meta::{ClassInf, ClassificationItem, ClassificationObj, MetaInfoResponse, MetadataInf};

use serde::Deserialize;

/// `RESULT` header carried by every envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultInfo {
    /// Zero on success; any other value is an upstream error.
    #[serde(rename = "STATUS")]
    pub status: i32,
    /// Upstream status message (an error description when `status != 0`).
    #[serde(rename = "ERROR_MSG")]
    pub error_msg: String,
}

/// `RESULT_INF` pagination block shared by the listing and data envelopes.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationInf {
    #[serde(rename = "TOTAL_NUMBER")]
    pub total_number: Option<u32>,
    #[serde(rename = "FROM_NUMBER", default)]
    pub from_number: u32,
    #[serde(rename = "TO_NUMBER", default)]
    pub to_number: u32,
    /// Present when the response was truncated; the next start position.
    #[serde(rename = "NEXT_KEY")]
    pub next_key: Option<u32>,
}

/// An element carrying a `code` attribute and a display name as text,
/// e.g. `<GOV_ORG code="00200">総務省</GOV_ORG>`.
#[derive(Debug, Clone, Deserialize)]
pub struct CodedName {
    #[serde(rename = "@code")]
    pub code: String,
    #[serde(rename = "$text")]
    pub name: String,
}
