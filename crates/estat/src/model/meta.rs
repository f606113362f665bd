//! `GET_META_INFO` envelope: classification metadata for one table.

use serde::Deserialize;

use super::ResultInfo;

/// Envelope returned by `getMetaInfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaInfoResponse {
    #[serde(rename = "RESULT")]
    pub result: ResultInfo,
    #[serde(rename = "METADATA_INF")]
    pub metadata: Option<MetadataInf>,
}

/// `METADATA_INF` payload: the classification axes of one table.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataInf {
    #[serde(rename = "CLASS_INF")]
    pub class_inf: ClassInf,
}

/// `CLASS_INF` wrapper around the per-axis classification objects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassInf {
    #[serde(rename = "CLASS_OBJ", default)]
    pub objects: Vec<ClassificationObj>,
}

/// One classification axis (`CLASS_OBJ`): tab, cat01..cat15, area or time.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationObj {
    /// Axis identifier, matching the attribute names on `VALUE` cells.
    #[serde(rename = "@id")]
    pub id: String,
    /// Axis display name.
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "CLASS", default)]
    pub classes: Vec<ClassificationItem>,
}

/// One `CLASS` entry: a code and its display metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationItem {
    #[serde(rename = "@code")]
    pub code: String,
    /// Display name; entries without one are dropped during catalog
    /// construction rather than failing the response.
    #[serde(rename = "@name")]
    pub name: Option<String>,
    #[serde(rename = "@level")]
    pub level: Option<String>,
    #[serde(rename = "@unit")]
    pub unit: Option<String>,
    #[serde(rename = "@parentCode")]
    pub parent_code: Option<String>,
}
