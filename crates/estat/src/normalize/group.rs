//! Recursive grouping of resolved value cells into a nested attribute tree.

use indexmap::IndexMap;
use serde::Serialize;

use super::catalog::ResolvedValue;

/// Nested grouping of value cells keyed by resolved attribute values.
///
/// Serializes as plain nested JSON objects: branches nest one level per
/// axis, and the final axis collapses into a flat map from resolved value
/// to cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeTree {
    /// Final axis: maps each resolved value to its cell value.
    Leaf(IndexMap<String, String>),
    /// Intermediate axis: maps each resolved value to a subtree over the
    /// remaining axes.
    Branch(IndexMap<String, AttributeTree>),
}

impl AttributeTree {
    /// Total number of cell values stored in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            AttributeTree::Leaf(map) => map.len(),
            AttributeTree::Branch(map) => map.values().map(AttributeTree::leaf_count).sum(),
        }
    }
}

/// Group cells by their attribute values, one nesting level per axis.
///
/// Grouping keys appear in first-seen order and records sharing a prefix of
/// resolved values always land in the same subtree. Every cell is expected
/// to carry the same axis set (one table always emits a uniform shape);
/// the result for mixed-arity input is unspecified.
pub fn group_values(records: &[ResolvedValue]) -> AttributeTree {
    let items: Vec<(&[(String, String)], &str)> = records
        .iter()
        .map(|record| (record.axes.as_slice(), record.value.as_str()))
        .collect();
    group_pairs(&items)
}

fn group_pairs(items: &[(&[(String, String)], &str)]) -> AttributeTree {
    // One axis left on every record: collapse into the final value map.
    // An empty input collapses into an empty leaf.
    if items.iter().all(|(axes, _)| axes.len() == 1) {
        let mut leaf = IndexMap::new();
        for &(axes, value) in items {
            let (_, key) = &axes[0];
            if let Some(previous) = leaf.insert(key.clone(), value.to_string()) {
                // Upstream occasionally emits two cells for the same final
                // attribute value; the newer cell wins.
                tracing::warn!(key = %key, previous = %previous, "duplicate leaf attribute value");
            }
        }
        return AttributeTree::Leaf(leaf);
    }

    // Partition on the first remaining axis, then recurse with it dropped.
    let mut partitions: IndexMap<String, Vec<(&[(String, String)], &str)>> = IndexMap::new();
    for &(axes, value) in items {
        let Some((_, key)) = axes.first() else { continue };
        partitions
            .entry(key.clone())
            .or_default()
            .push((&axes[1..], value));
    }

    AttributeTree::Branch(
        partitions
            .into_iter()
            .map(|(key, group)| (key, group_pairs(&group)))
            .collect(),
    )
}
