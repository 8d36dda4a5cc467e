//! Lazy depth-first traversal.

use super::view::ResourceRef;
use super::ResourceTree;
use crate::resource::ResourceId;

/// Pre-order, depth-first iterator over a subtree, inclusive of its start.
///
/// Siblings are visited in child insertion order. Each call to
/// [`ResourceTree::walk`] starts a fresh traversal.
#[derive(Clone)]
pub struct Walk<'a> {
    tree: &'a ResourceTree,
    stack: Vec<ResourceId>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(tree: &'a ResourceTree, start: ResourceId) -> Self {
        Self {
            tree,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = ResourceRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let resource = &self.tree.arena[id];
        self.stack.extend(resource.children.values().rev().copied());
        Some(ResourceRef::new(self.tree, id))
    }
}

#[cfg(test)]
mod tests {
    use crate::ResourceTree;

    fn paths(tree: &ResourceTree, start: &str) -> Vec<String> {
        tree.walk_from(start)
            .map(|walk| walk.map(|r| r.path()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_walk_preorder() {
        let mut tree = ResourceTree::new("r").unwrap();
        tree.create("/r/a/x", None).unwrap();
        tree.create("/r/a/y", None).unwrap();
        tree.create("/r/b", None).unwrap();

        assert_eq!(
            paths(&tree, "/r"),
            vec!["/r", "/r/a", "/r/a/x", "/r/a/y", "/r/b"]
        );
    }

    #[test]
    fn test_walk_from_subtree_is_inclusive() {
        let mut tree = ResourceTree::new("r").unwrap();
        tree.create("/r/a/x", None).unwrap();
        tree.create("/r/b", None).unwrap();
        assert_eq!(paths(&tree, "/r/a"), vec!["/r/a", "/r/a/x"]);
    }

    #[test]
    fn test_walk_is_restartable() {
        let mut tree = ResourceTree::new("r").unwrap();
        tree.create("/r/a", None).unwrap();
        let first: Vec<_> = tree.walk().map(|r| r.path()).collect();
        let second: Vec<_> = tree.walk().map(|r| r.path()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_walk_single_root() {
        let tree = ResourceTree::new("solo").unwrap();
        assert_eq!(tree.walk().count(), 1);
    }

    #[test]
    fn test_walk_from_missing_is_none() {
        let tree = ResourceTree::new("r").unwrap();
        assert!(tree.walk_from("/r/missing").is_none());
        assert!(tree.walk_from("/other").is_none());
    }
}
