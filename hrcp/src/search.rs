//! Attribute-based search over a tree.
//!
//! Searches walk a subtree in pre-order (the whole tree when no start path
//! is given) and compare local attributes only; nothing is inherited. A
//! start path that does not exist finds nothing.

use serde_json::Value;

use crate::tree::{ResourceRef, ResourceTree, Walk};

/// Attribute key and the value it must hold.
pub type Criterion<'c> = (&'c str, Value);

fn start<'a>(tree: &'a ResourceTree, path: Option<&str>) -> Option<Walk<'a>> {
    match path {
        Some(path) => tree.walk_from(path),
        None => Some(tree.walk()),
    }
}

/// Whether every criterion is set locally on `resource` with an equal value.
#[must_use]
pub fn matches_criteria(resource: ResourceRef<'_>, criteria: &[Criterion<'_>]) -> bool {
    criteria
        .iter()
        .all(|(key, expected)| resource.get_attribute(key) == Some(expected))
}

/// Every resource matching all `criteria`, in walk order.
///
/// # Examples
///
/// ```
/// use hrcp::{search, ResourceTree};
/// use serde_json::json;
///
/// let mut tree = ResourceTree::new("org").unwrap();
/// tree.create("/org/a", None).unwrap();
/// tree.create("/org/b", None).unwrap();
/// tree.set_attribute("/org/b", "tier", json!("gold")).unwrap();
///
/// let found = search::find(&tree, None, &[("tier", json!("gold"))]);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].name(), "b");
/// ```
#[must_use]
pub fn find<'a>(
    tree: &'a ResourceTree,
    path: Option<&str>,
    criteria: &[Criterion<'_>],
) -> Vec<ResourceRef<'a>> {
    filter(tree, path, |resource| matches_criteria(resource, criteria))
}

/// The first resource in walk order matching all `criteria`.
#[must_use]
pub fn find_first<'a>(
    tree: &'a ResourceTree,
    path: Option<&str>,
    criteria: &[Criterion<'_>],
) -> Option<ResourceRef<'a>> {
    start(tree, path)?.find(|resource| matches_criteria(*resource, criteria))
}

/// Every resource for which `predicate` holds, in walk order.
pub fn filter<'a, F>(tree: &'a ResourceTree, path: Option<&str>, mut predicate: F) -> Vec<ResourceRef<'a>>
where
    F: FnMut(ResourceRef<'a>) -> bool,
{
    start(tree, path)
        .map(|walk| walk.filter(|resource| predicate(*resource)).collect())
        .unwrap_or_default()
}

/// Whether any resource matches all `criteria`.
#[must_use]
pub fn exists(tree: &ResourceTree, path: Option<&str>, criteria: &[Criterion<'_>]) -> bool {
    find_first(tree, path, criteria).is_some()
}

/// Number of resources matching all `criteria`.
#[must_use]
pub fn count(tree: &ResourceTree, path: Option<&str>, criteria: &[Criterion<'_>]) -> usize {
    start(tree, path)
        .map(|walk| walk.filter(|resource| matches_criteria(*resource, criteria)).count())
        .unwrap_or(0)
}
