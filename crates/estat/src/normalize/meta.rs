//! Classification metadata normalization.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Result;
use crate::model::{ClassificationObj, MetaInfoResponse};

use super::{NormalizedResponse, Segment};

/// One classification axis rendered for output.
#[derive(Debug, Clone, Serialize)]
struct AxisMeta<'a> {
    name: &'a str,
    codes: Vec<CodeMeta<'a>>,
}

/// One classification code rendered for output.
#[derive(Debug, Clone, Serialize)]
struct CodeMeta<'a> {
    code: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'a str>,
    #[serde(rename = "parentCode", skip_serializing_if = "Option::is_none")]
    parent_code: Option<&'a str>,
}

fn render_axes(objects: &[ClassificationObj]) -> IndexMap<&str, AxisMeta<'_>> {
    let mut axes = IndexMap::new();
    for obj in objects {
        let codes = obj
            .classes
            .iter()
            .filter_map(|item| {
                // Nameless entries are omitted, same as in catalog
                // construction.
                item.name.as_deref().map(|name| CodeMeta {
                    code: &item.code,
                    name,
                    level: item.level.as_deref(),
                    unit: item.unit.as_deref(),
                    parent_code: item.parent_code.as_deref(),
                })
            })
            .collect();
        axes.insert(
            obj.id.as_str(),
            AxisMeta {
                name: &obj.name,
                codes,
            },
        );
    }
    axes
}

/// Normalize a classification metadata response. Metadata carries no
/// pagination, so no continuation hint is ever added.
pub fn normalize_metadata(response: &MetaInfoResponse) -> Result<NormalizedResponse> {
    if response.result.status != 0 {
        return Ok(NormalizedResponse::upstream_error(&response.result.error_msg));
    }
    let Some(metadata) = &response.metadata else {
        return Ok(NormalizedResponse::no_data());
    };
    if metadata.class_inf.objects.is_empty() {
        return Ok(NormalizedResponse::no_data());
    }

    let axes = render_axes(&metadata.class_inf.objects);
    let segments = vec![
        Segment::Text(
            "Classification metadata per axis (code: classification code, \
             name: display name, level: hierarchy depth, unit: measurement unit, \
             parentCode: parent classification code)"
                .to_string(),
        ),
        Segment::Json(serde_json::to_value(&axes)?),
    ];
    Ok(NormalizedResponse::ok(segments))
}
