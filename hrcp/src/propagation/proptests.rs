//! Property-based tests for propagation modes.

use proptest::prelude::*;
use serde_json::{json, Value};

use super::{resolve, resolve_with_provenance, PropagationMode};
use crate::ResourceTree;

/// Build a linear chain `/n0/n1/.../n{depth-1}` and return its paths.
fn chain(depth: usize) -> (ResourceTree, Vec<String>) {
    let mut tree = ResourceTree::new("n0").unwrap();
    let mut paths = vec!["/n0".to_string()];
    for level in 1..depth {
        let path = format!("{}/n{level}", paths[level - 1]);
        tree.create(&path, None).unwrap();
        paths.push(path);
    }
    (tree, paths)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // The deepest level that sets the key wins
    #[test]
    fn inherit_returns_deepest_setter(set in prop::collection::vec(any::<bool>(), 1..8)) {
        let (mut tree, paths) = chain(set.len());
        for (level, flag) in set.iter().enumerate() {
            if *flag {
                tree.set_attribute(&paths[level], "k", json!(level)).unwrap();
            }
        }
        let leaf = paths.last().unwrap();
        let expected = set.iter().rposition(|flag| *flag);
        let provenance = tree
            .resolve_with_provenance(leaf, "k", PropagationMode::Inherit)
            .unwrap();

        match expected {
            Some(level) => {
                let provenance = provenance.unwrap();
                prop_assert_eq!(provenance.value, json!(level));
                prop_assert_eq!(&provenance.source_path, &paths[level]);
            }
            None => prop_assert!(provenance.is_none()),
        }
    }

    // Truthy result iff every level is truthy
    #[test]
    fn require_path_needs_every_level(flags in prop::collection::vec(any::<bool>(), 1..8)) {
        let (mut tree, paths) = chain(flags.len());
        for (path, flag) in paths.iter().zip(&flags) {
            tree.set_attribute(path, "on", json!(*flag)).unwrap();
        }
        let resolved = tree
            .resolve(paths.last().unwrap(), "on", PropagationMode::RequirePath)
            .unwrap();
        if flags.iter().all(|flag| *flag) {
            prop_assert_eq!(resolved, Some(json!(true)));
        } else {
            prop_assert_eq!(resolved, None);
        }
    }

    // Aggregation visits exactly the setters, in walk order
    #[test]
    fn aggregate_is_complete(
        children in prop::collection::vec(any::<bool>(), 0..10),
        root_set in any::<bool>(),
    ) {
        let mut tree = ResourceTree::new("r").unwrap();
        if root_set {
            tree.set_attribute("/r", "k", json!("root")).unwrap();
        }
        let mut expected = if root_set { vec!["/r".to_string()] } else { Vec::new() };
        for (index, flag) in children.iter().enumerate() {
            let path = format!("/r/c{index}");
            tree.create(&path, None).unwrap();
            if *flag {
                tree.set_attribute(&path, "k", json!(index)).unwrap();
                expected.push(path);
            }
        }

        let values = resolve(tree.root(), "k", PropagationMode::Aggregate).unwrap();
        prop_assert_eq!(values.as_array().map(Vec::len), Some(expected.len()));

        let provenance = resolve_with_provenance(tree.root(), "k", PropagationMode::Aggregate);
        if expected.is_empty() {
            prop_assert!(provenance.is_none());
        } else {
            prop_assert_eq!(provenance.unwrap().contributing_paths, Some(expected));
        }
    }

    // Collected levels line up with the chain, resource first
    #[test]
    fn collect_ancestors_has_one_entry_per_level(set in prop::collection::vec(any::<bool>(), 1..8)) {
        let (mut tree, paths) = chain(set.len());
        for (level, flag) in set.iter().enumerate() {
            if *flag {
                tree.set_attribute(&paths[level], "k", json!(level)).unwrap();
            }
        }
        let resolved = tree
            .resolve(paths.last().unwrap(), "k", PropagationMode::CollectAncestors)
            .unwrap();
        if set.iter().any(|flag| *flag) {
            let expected: Vec<Value> = set
                .iter()
                .enumerate()
                .rev()
                .map(|(level, flag)| if *flag { json!(level) } else { Value::Null })
                .collect();
            prop_assert_eq!(resolved, Some(Value::Array(expected)));
        } else {
            prop_assert_eq!(resolved, None);
        }
    }
}
