//! Data value normalization.

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{Annotation, StatsDataResponse};

use super::catalog::{resolve_value, ClassificationCatalog};
use super::group::group_values;
use super::{continuation_hint, NormalizedResponse, Segment};

/// Footnote block collected from the `ANNOTATION` side channel.
///
/// `NOTE` entries also exist upstream but are not rendered; their
/// descriptions are unreliable in the source data.
fn footnotes(annotations: &[Annotation]) -> Option<Segment> {
    if annotations.is_empty() {
        return None;
    }
    let block: IndexMap<&str, &str> = annotations
        .iter()
        .map(|a| (a.symbol.as_str(), a.description.as_str()))
        .collect();
    Some(Segment::Json(serde_json::json!({ "annotations": block })))
}

/// Normalize a data response: build the classification catalog, resolve
/// every cell through it, and group the resolved cells into a nested
/// attribute tree.
pub fn normalize_data(response: &StatsDataResponse) -> Result<NormalizedResponse> {
    if response.result.status != 0 {
        return Ok(NormalizedResponse::upstream_error(&response.result.error_msg));
    }
    let Some(stat_data) = &response.statistical_data else {
        return Ok(NormalizedResponse::no_data());
    };
    let Some(data_inf) = &stat_data.data_inf else {
        return Ok(NormalizedResponse::no_data());
    };
    if data_inf.values.is_empty() {
        return Ok(NormalizedResponse::no_data());
    }

    let catalog = ClassificationCatalog::from_objects(&stat_data.class_inf.objects);
    let resolved: Vec<_> = data_inf
        .values
        .iter()
        .map(|cell| resolve_value(&catalog, cell))
        .collect();
    let tree = group_values(&resolved);
    tracing::debug!(
        cells = resolved.len(),
        leaves = tree.leaf_count(),
        "grouped data response"
    );

    let mut segments = vec![
        Segment::Text(
            "Table values, nested by classification in axis order; leaf keys \
             are the final classification values, leaf values the cell values. \
             A value suffixed with <symbol> refers to an annotation."
                .to_string(),
        ),
        Segment::Json(serde_json::to_value(&tree)?),
    ];
    if let Some(block) = footnotes(&data_inf.annotations) {
        segments.push(block);
    }
    if let Some(hint) = continuation_hint(stat_data.result_inf.next_key) {
        segments.push(hint);
    }
    Ok(NormalizedResponse::ok(segments))
}
