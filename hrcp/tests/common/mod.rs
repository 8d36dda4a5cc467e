//! Common test utilities for integration tests.
//!
//! This module provides fixture builders for hrcp trees.

use hrcp::{Attributes, ResourceTree};
use serde_json::Value;

/// Build an attribute map from key/value pairs.
#[allow(dead_code)]
pub fn attrs(pairs: &[(&str, Value)]) -> Attributes {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect()
}

/// The platform tree used across scenarios:
///
/// ```text
/// platform [timeout=30]
/// ├── us-east
/// │   ├── api [timeout=60]
/// │   └── db
/// └── eu-west
///     └── api
/// ```
#[allow(dead_code)]
pub fn platform_tree() -> ResourceTree {
    TreeFixture::new("platform")
        .with("/platform", "timeout", serde_json::json!(30))
        .node("/platform/us-east/api")
        .with("/platform/us-east/api", "timeout", serde_json::json!(60))
        .node("/platform/us-east/db")
        .node("/platform/eu-west/api")
        .build()
}

/// A single chain `/n0/n1/.../n{depth-1}`; returns the tree and the paths
/// from root to leaf.
#[allow(dead_code)]
pub fn chain(depth: usize) -> (ResourceTree, Vec<String>) {
    let mut tree = ResourceTree::new("n0").expect("valid root");
    let mut paths = vec!["/n0".to_string()];
    for i in 1..depth {
        let path = format!("{}/n{i}", paths[i - 1]);
        tree.create(&path, None).expect("create chain node");
        paths.push(path);
    }
    (tree, paths)
}

/// Builder for test trees with sensible defaults.
///
/// # Examples
///
/// ```no_run
/// # use common::TreeFixture;
/// let tree = TreeFixture::new("org")
///     .node("/org/team")
///     .with("/org/team", "size", serde_json::json!(4))
///     .build();
/// ```
#[allow(dead_code)]
pub struct TreeFixture {
    tree: ResourceTree,
}

#[allow(dead_code)]
impl TreeFixture {
    /// Creates a new fixture with only a root.
    pub fn new(root: &str) -> Self {
        Self {
            tree: ResourceTree::new(root).expect("valid root name"),
        }
    }

    /// Ensures a resource exists at `path`.
    pub fn node(mut self, path: &str) -> Self {
        if !self.tree.contains(path) {
            self.tree.create(path, None).expect("create fixture node");
        }
        self
    }

    /// Sets an attribute, creating the resource if needed.
    pub fn with(self, path: &str, key: &str, value: Value) -> Self {
        let mut fixture = self.node(path);
        fixture
            .tree
            .set_attribute(path, key, value)
            .expect("set fixture attribute");
        fixture
    }

    /// Finishes the builder.
    pub fn build(self) -> ResourceTree {
        self.tree
    }
}

/// Snapshot of every (path, attributes) pair in walk order.
#[allow(dead_code)]
pub fn snapshot(tree: &ResourceTree) -> Vec<(String, Attributes)> {
    tree.walk()
        .map(|resource| (resource.path(), resource.attributes().clone()))
        .collect()
}
