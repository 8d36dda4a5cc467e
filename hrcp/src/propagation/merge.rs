//! Recursive mapping merge with per-leaf source attribution.
//!
//! Contributions are folded from the root down to the resource. Two
//! mappings merge key by key; anything else is replaced wholesale by the
//! closer value. A parallel tree of [`SourceNode`]s mirrors the merged
//! value so every leaf remembers which resource wrote it last.
//!
//! The fold only runs when every level on the chain holds a mapping. A
//! single non-mapping level anywhere turns the result into the closest
//! value as-is, with no key attribution.

use indexmap::IndexMap;
use serde_json::Value;

use super::resolver::local;
use crate::tree::ResourceRef;

/// Result of a `Merge` resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    /// The merged value.
    pub value: Value,
    /// Closest resource that contributed.
    pub source_path: String,
    /// Dot-joined leaf key to contributing path. Empty unless every level
    /// on the chain held a mapping.
    pub key_sources: IndexMap<String, String>,
}

#[derive(Debug)]
enum SourceNode {
    Leaf(String),
    Branch(IndexMap<String, SourceNode>),
}

impl SourceNode {
    fn from_value(value: &Value, path: &str) -> Self {
        match value {
            Value::Object(map) if !map.is_empty() => Self::Branch(
                map.iter()
                    .map(|(key, child)| (key.clone(), Self::from_value(child, path)))
                    .collect(),
            ),
            _ => Self::Leaf(path.to_string()),
        }
    }

    fn flatten_into(self, prefix: &str, out: &mut IndexMap<String, String>) {
        match self {
            Self::Leaf(path) => {
                if !prefix.is_empty() {
                    out.insert(prefix.to_string(), path);
                }
            }
            Self::Branch(children) => {
                for (key, child) in children {
                    let key_path = if prefix.is_empty() {
                        key
                    } else {
                        format!("{prefix}.{key}")
                    };
                    child.flatten_into(&key_path, out);
                }
            }
        }
    }
}

/// Merge the values of `key` from the root down to `resource`.
///
/// Returns `None` when no level on the chain has a non-null value.
#[must_use]
pub fn merge(resource: ResourceRef<'_>, key: &str) -> Option<Merged> {
    let contributions: Vec<_> = resource
        .ancestors()
        .filter_map(|level| local(level, key).map(|value| (level.path(), value)))
        .collect();
    let (source_path, closest) = contributions.first()?;

    if !contributions.iter().all(|(_, value)| value.is_object()) {
        log::trace!(
            "Non-mapping '{key}' on the chain of {}, closest value wins",
            resource.path()
        );
        return Some(Merged {
            value: (*closest).clone(),
            source_path: source_path.clone(),
            key_sources: IndexMap::new(),
        });
    }
    let source_path = source_path.clone();

    let mut folded: Option<(Value, SourceNode)> = None;
    for (path, value) in contributions.iter().rev() {
        folded = Some(match folded {
            None => ((*value).clone(), SourceNode::from_value(value, path)),
            Some((base, sources)) => merge_value(base, sources, value, path),
        });
    }
    let (value, sources) = folded?;

    let mut key_sources = IndexMap::new();
    sources.flatten_into("", &mut key_sources);
    Some(Merged {
        value,
        source_path,
        key_sources,
    })
}

fn merge_value(base: Value, sources: SourceNode, overlay: &Value, path: &str) -> (Value, SourceNode) {
    let (Value::Object(mut merged), Value::Object(overlay_map)) = (base, overlay) else {
        return (overlay.clone(), SourceNode::from_value(overlay, path));
    };

    let mut merged_sources = match sources {
        SourceNode::Branch(children) => children,
        SourceNode::Leaf(_) => IndexMap::new(),
    };
    for (key, value) in overlay_map {
        if let Some(slot) = merged.get_mut(key) {
            let previous = std::mem::take(slot);
            let previous_source = merged_sources
                .get_mut(key)
                .map_or_else(
                    || SourceNode::Leaf(path.to_string()),
                    |node| std::mem::replace(node, SourceNode::Leaf(String::new())),
                );
            let (value, source) = merge_value(previous, previous_source, value, path);
            *slot = value;
            merged_sources.insert(key.clone(), source);
        } else {
            merged.insert(key.clone(), value.clone());
            merged_sources.insert(key.clone(), SourceNode::from_value(value, path));
        }
    }

    if merged.is_empty() {
        return (Value::Object(merged), SourceNode::Leaf(path.to_string()));
    }
    (Value::Object(merged), SourceNode::Branch(merged_sources))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResourceTree;
    use serde_json::json;

    fn tree_with(values: &[(&str, Value)]) -> ResourceTree {
        let mut tree = ResourceTree::new("a").unwrap();
        tree.create("/a/b/c", None).unwrap();
        for (path, value) in values {
            tree.set_attribute(path, "cfg", value.clone()).unwrap();
        }
        tree
    }

    fn sources(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_merge_override() {
        let tree = tree_with(&[
            ("/a", json!({"x": 1, "y": {"a": 1, "b": 2}})),
            ("/a/b", json!({"y": {"a": 9}})),
        ]);
        let merged = merge(tree.get("/a/b").unwrap(), "cfg").unwrap();

        assert_eq!(merged.value, json!({"x": 1, "y": {"a": 9, "b": 2}}));
        assert_eq!(merged.source_path, "/a/b");
        assert_eq!(
            merged.key_sources,
            sources(&[("x", "/a"), ("y.a", "/a/b"), ("y.b", "/a")])
        );
    }

    #[test]
    fn test_merge_single_level_is_identity() {
        let value = json!({"db": {"host": "h", "port": 5432}, "debug": false});
        let tree = tree_with(&[("/a", value.clone())]);
        let merged = merge(tree.root(), "cfg").unwrap();
        assert_eq!(merged.value, value);
        assert_eq!(merged.source_path, "/a");
        assert!(merged.key_sources.values().all(|p| p == "/a"));
        assert_eq!(merged.key_sources.len(), 3);
    }

    #[test]
    fn test_merge_source_path_is_closest_contributor() {
        let tree = tree_with(&[("/a", json!({"x": 1})), ("/a/b", json!({"y": 2}))]);
        let merged = merge(tree.get("/a/b/c").unwrap(), "cfg").unwrap();
        assert_eq!(merged.source_path, "/a/b");
        assert_eq!(merged.value, json!({"x": 1, "y": 2}));
    }

    #[test]
    fn test_merge_scalar_replaces_mapping() {
        let tree = tree_with(&[
            ("/a", json!({"db": {"host": "h", "port": 1}})),
            ("/a/b", json!({"db": "disabled"})),
        ]);
        let merged = merge(tree.get("/a/b").unwrap(), "cfg").unwrap();
        assert_eq!(merged.value, json!({"db": "disabled"}));
        assert_eq!(merged.key_sources, sources(&[("db", "/a/b")]));
    }

    #[test]
    fn test_merge_mapping_replaces_scalar() {
        let tree = tree_with(&[
            ("/a", json!({"db": "off"})),
            ("/a/b", json!({"db": {"host": "h"}})),
        ]);
        let merged = merge(tree.get("/a/b").unwrap(), "cfg").unwrap();
        assert_eq!(merged.value, json!({"db": {"host": "h"}}));
        assert_eq!(merged.key_sources, sources(&[("db.host", "/a/b")]));
    }

    #[test]
    fn test_merge_non_mapping_level_returns_closest_value() {
        // A scalar between two mappings.
        let tree = tree_with(&[
            ("/a", json!({"x": 1})),
            ("/a/b", json!(5)),
            ("/a/b/c", json!({"y": 2})),
        ]);
        let merged = merge(tree.get("/a/b/c").unwrap(), "cfg").unwrap();
        assert_eq!(merged.value, json!({"y": 2}));
        assert_eq!(merged.source_path, "/a/b/c");
        assert!(merged.key_sources.is_empty());

        let at_b = merge(tree.get("/a/b").unwrap(), "cfg").unwrap();
        assert_eq!(at_b.value, json!(5));
        assert!(at_b.key_sources.is_empty());

        // A scalar at the root behaves the same way.
        let tree = tree_with(&[
            ("/a", json!(5)),
            ("/a/b", json!({"x": 1})),
            ("/a/b/c", json!({"y": 2})),
        ]);
        let merged = merge(tree.get("/a/b/c").unwrap(), "cfg").unwrap();
        assert_eq!(merged.value, json!({"y": 2}));
        assert_eq!(merged.source_path, "/a/b/c");
        assert!(merged.key_sources.is_empty());
    }

    #[test]
    fn test_merge_closest_scalar_over_mappings() {
        let tree = tree_with(&[("/a", json!({"x": 1})), ("/a/b", json!("off"))]);
        let merged = merge(tree.get("/a/b").unwrap(), "cfg").unwrap();
        assert_eq!(merged.value, json!("off"));
        assert_eq!(merged.source_path, "/a/b");
        assert!(merged.key_sources.is_empty());
    }

    #[test]
    fn test_merge_lists_replace() {
        let tree = tree_with(&[("/a", json!({"tags": [1, 2]})), ("/a/b", json!({"tags": [3]}))]);
        let merged = merge(tree.get("/a/b").unwrap(), "cfg").unwrap();
        assert_eq!(merged.value, json!({"tags": [3]}));
    }

    #[test]
    fn test_merge_empty_mapping_is_a_leaf() {
        let tree = tree_with(&[("/a", json!({"opts": {}})), ("/a/b", json!({"x": 1}))]);
        let merged = merge(tree.get("/a/b").unwrap(), "cfg").unwrap();
        assert_eq!(merged.key_sources, sources(&[("opts", "/a"), ("x", "/a/b")]));
    }

    #[test]
    fn test_merge_skips_null_levels() {
        let tree = tree_with(&[("/a", json!({"x": 1})), ("/a/b", Value::Null)]);
        let merged = merge(tree.get("/a/b").unwrap(), "cfg").unwrap();
        assert_eq!(merged.value, json!({"x": 1}));
        assert_eq!(merged.source_path, "/a");
    }

    #[test]
    fn test_merge_absent() {
        let tree = tree_with(&[]);
        assert!(merge(tree.get("/a/b/c").unwrap(), "cfg").is_none());
    }

    #[test]
    fn test_merge_deep_nesting_keeps_order() {
        let tree = tree_with(&[
            ("/a", json!({"l1": {"l2": {"a": 1, "b": 2}}, "z": 0})),
            ("/a/b", json!({"l1": {"l2": {"b": 3, "c": 4}}})),
        ]);
        let merged = merge(tree.get("/a/b").unwrap(), "cfg").unwrap();
        assert_eq!(
            merged.value,
            json!({"l1": {"l2": {"a": 1, "b": 3, "c": 4}}, "z": 0})
        );
        let keys: Vec<_> = merged.key_sources.keys().cloned().collect();
        assert_eq!(keys, vec!["l1.l2.a", "l1.l2.b", "l1.l2.c", "z"]);
        assert_eq!(merged.key_sources["l1.l2.b"], "/a/b");
        assert_eq!(merged.key_sources["l1.l2.a"], "/a");
    }
}
