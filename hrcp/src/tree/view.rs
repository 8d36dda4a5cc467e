//! Borrowed, read-only views of resources inside a tree.

use std::fmt;

use serde_json::Value;

use super::walk::Walk;
use super::ResourceTree;
use crate::path::join;
use crate::resource::{Attributes, Resource, ResourceId};

/// A resource together with the tree it lives in.
///
/// The view can navigate to the parent and the children, which a bare
/// [`Resource`] cannot since it only stores handles.
#[derive(Clone, Copy)]
pub struct ResourceRef<'a> {
    tree: &'a ResourceTree,
    id: ResourceId,
    resource: &'a Resource,
}

impl<'a> ResourceRef<'a> {
    pub(crate) fn new(tree: &'a ResourceTree, id: ResourceId) -> Self {
        Self {
            tree,
            id,
            resource: &tree.arena[id],
        }
    }

    /// Handle of this resource.
    #[must_use]
    pub const fn id(&self) -> ResourceId {
        self.id
    }

    /// The tree this resource belongs to.
    #[must_use]
    pub const fn tree(&self) -> &'a ResourceTree {
        self.tree
    }

    /// The underlying resource node.
    #[must_use]
    pub const fn resource(&self) -> &'a Resource {
        self.resource
    }

    /// Resource name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.resource.name()
    }

    /// Absolute path, `"/" + root_name` for the root.
    ///
    /// Derived from the parent chain on every call.
    #[must_use]
    pub fn path(&self) -> String {
        let mut names: Vec<&str> = self.ancestors().map(|r| r.name()).collect();
        names.reverse();
        join(names)
    }

    /// The resource's own attributes.
    #[must_use]
    pub fn attributes(&self) -> &'a Attributes {
        self.resource.attributes()
    }

    /// Look up a local attribute (`None` = never set).
    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&'a Value> {
        self.resource.get_attribute(key)
    }

    /// Check whether a key is set locally.
    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.resource.has_attribute(key)
    }

    /// The parent resource, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.resource.parent.map(|id| Self::new(self.tree, id))
    }

    /// Direct children in insertion order.
    #[must_use]
    pub fn children(&self) -> Children<'a> {
        Children {
            tree: self.tree,
            ids: self.resource.children.values(),
        }
    }

    /// The named direct child.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<Self> {
        self.resource
            .child_id(name)
            .map(|id| Self::new(self.tree, id))
    }

    /// Number of direct children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.resource.child_count()
    }

    /// Whether this resource is the tree root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.resource.parent.is_none()
    }

    /// Number of edges between this resource and the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// This resource followed by each ancestor up to the root.
    #[must_use]
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors { next: Some(*self) }
    }

    /// Pre-order traversal of the subtree rooted here, inclusive.
    #[must_use]
    pub fn walk(&self) -> Walk<'a> {
        Walk::new(self.tree, self.id)
    }
}

impl PartialEq for ResourceRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for ResourceRef<'_> {}

impl fmt::Debug for ResourceRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRef")
            .field("path", &self.path())
            .field("attributes", self.attributes())
            .finish()
    }
}

/// Iterator over the direct children of a resource.
#[derive(Clone)]
pub struct Children<'a> {
    tree: &'a ResourceTree,
    ids: indexmap::map::Values<'a, String, ResourceId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = ResourceRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|&id| ResourceRef::new(self.tree, id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids
            .next_back()
            .map(|&id| ResourceRef::new(self.tree, id))
    }
}

impl ExactSizeIterator for Children<'_> {}

/// Iterator from a resource up to the root, self first.
#[derive(Clone)]
pub struct Ancestors<'a> {
    next: Option<ResourceRef<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = ResourceRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}
