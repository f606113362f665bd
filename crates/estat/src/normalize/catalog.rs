//! Classification catalog construction and code resolution.

use indexmap::IndexMap;

use crate::model::{ClassificationObj, ValueCell};

/// Mapping from classification code to display name for one axis.
pub type CodeMap = IndexMap<String, String>;

/// Per-table mapping from axis id to its code map.
///
/// Built once from the `CLASS_OBJ` list of a metadata or data response and
/// never mutated afterwards; it lives only as long as the response that
/// produced it.
#[derive(Debug, Clone, Default)]
pub struct ClassificationCatalog {
    axes: IndexMap<String, CodeMap>,
}

impl ClassificationCatalog {
    /// Build a catalog from the classification objects of a response.
    ///
    /// Every axis id becomes a key even when its code map ends up empty.
    /// Entries without a display name are skipped; a repeated (axis, code)
    /// pair keeps its first display name.
    pub fn from_objects(objects: &[ClassificationObj]) -> Self {
        let mut axes = IndexMap::new();
        for obj in objects {
            let map: &mut CodeMap = axes.entry(obj.id.clone()).or_default();
            for item in &obj.classes {
                let Some(name) = &item.name else { continue };
                let display = match &item.unit {
                    Some(unit) => format!("{name}({unit})"),
                    None => name.clone(),
                };
                map.entry(item.code.clone()).or_insert(display);
            }
        }
        Self { axes }
    }

    /// Resolve one code on one axis; `None` when the axis or code is
    /// unknown.
    pub fn resolve(&self, axis: &str, code: &str) -> Option<&str> {
        self.axes
            .get(axis)
            .and_then(|codes| codes.get(code))
            .map(String::as_str)
    }

    /// The code map for one axis.
    pub fn axis(&self, axis: &str) -> Option<&CodeMap> {
        self.axes.get(axis)
    }

    /// Axis ids in document order.
    pub fn axis_ids(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(String::as_str)
    }
}

/// A value cell with classification codes replaced by display names.
///
/// Axes are kept as a sparse ordered list of `(axis id, resolved value)`
/// pairs so the grouping step works over however many axes the table
/// happens to use.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValue {
    pub axes: Vec<(String, String)>,
    /// Cell value, suffixed with ` <symbol>` when the cell carries an
    /// annotation symbol.
    pub value: String,
}

/// Resolve every present axis code on a cell through the catalog.
///
/// Codes absent from the catalog pass through unchanged; the cell value is
/// never resolved. This never fails and never drops a field.
pub fn resolve_value(catalog: &ClassificationCatalog, cell: &ValueCell) -> ResolvedValue {
    let axes = cell
        .axes()
        .into_iter()
        .map(|(axis, code)| {
            let resolved = catalog.resolve(axis, code).unwrap_or(code);
            (axis.to_string(), resolved.to_string())
        })
        .collect();

    let value = match &cell.annotation {
        Some(symbol) => format!("{} <{}>", cell.value, symbol),
        None => cell.value.clone(),
    };

    ResolvedValue { axes, value }
}
