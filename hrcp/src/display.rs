//! Human-oriented views of a tree.

use std::collections::BTreeSet;

use crate::tree::{ResourceRef, ResourceTree};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Number of levels in the tree; a lone root has depth 1.
#[must_use]
pub fn tree_depth(tree: &ResourceTree) -> usize {
    tree.walk().map(|resource| resource.depth() + 1).max().unwrap_or(1)
}

/// Every attribute key used anywhere in the tree, sorted.
#[must_use]
pub fn attribute_keys(tree: &ResourceTree) -> BTreeSet<String> {
    tree.walk()
        .flat_map(|resource| resource.attributes().keys().cloned())
        .collect()
}

/// Render the tree (or the subtree at `path`) with box-drawing branches.
///
/// Each line is the resource name followed by its attributes as
/// `[key=value, ...]`, keys sorted and values JSON-encoded. `compact`
/// prints names only. A missing `path` renders as the empty string.
///
/// ```
/// use hrcp::{display, ResourceTree};
/// use serde_json::json;
///
/// let mut tree = ResourceTree::new("org").unwrap();
/// tree.create("/org/a/x", None).unwrap();
/// tree.create("/org/b", None).unwrap();
/// tree.set_attribute("/org/b", "n", json!(1)).unwrap();
///
/// assert_eq!(
///     display::pretty(&tree, None, false),
///     "org\n├── a\n│   └── x\n└── b [n=1]"
/// );
/// ```
#[must_use]
pub fn pretty(tree: &ResourceTree, path: Option<&str>, compact: bool) -> String {
    let start = match path {
        Some(path) => tree.get(path),
        None => Some(tree.root()),
    };
    let Some(start) = start else {
        return String::new();
    };

    let mut lines = vec![label(start, compact)];
    render_children(start, "", compact, &mut lines);
    lines.join("\n")
}

fn label(resource: ResourceRef<'_>, compact: bool) -> String {
    let attributes = resource.attributes();
    if compact || attributes.is_empty() {
        return resource.name().to_string();
    }
    let mut pairs: Vec<_> = attributes.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    let rendered: Vec<String> = pairs
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    format!("{} [{}]", resource.name(), rendered.join(", "))
}

fn render_children(resource: ResourceRef<'_>, prefix: &str, compact: bool, lines: &mut Vec<String>) {
    let count = resource.child_count();
    for (index, child) in resource.children().enumerate() {
        let last = index + 1 == count;
        let branch = if last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{prefix}{branch}{}", label(child, compact)));

        let continuation = if last { BLANK } else { PIPE };
        render_children(child, &format!("{prefix}{continuation}"), compact, lines);
    }
}
