//! Resource nodes and their handles.
//!
//! A [`Resource`] is a named node holding an attribute map. Resources live
//! inside a [`ResourceTree`](crate::ResourceTree) arena and refer to each
//! other through [`ResourceId`] handles: the parent owns its children (the
//! child map), the child only remembers its parent's id.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;
use crate::path::validate_name;

/// Attribute map of a resource.
///
/// Values use the JSON value domain: null, boolean, number, string, array
/// or string-keyed object.
pub type Attributes = IndexMap<String, Value>;

/// Generational handle to a resource slot in a tree.
///
/// A handle becomes stale once its resource is deleted; stale handles never
/// resolve to a resource created later in the same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

impl ResourceId {
    pub(crate) const fn new(index: usize, generation: u64) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the owning tree.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Generation of the slot when this handle was issued.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId({}v{})", self.index, self.generation)
    }
}

/// A node in the configuration tree.
///
/// Attribute writes on a `Resource` are unchecked; schema validation is
/// applied by [`ResourceTree::set_attribute`](crate::ResourceTree::set_attribute).
///
/// # Examples
///
/// ```
/// use hrcp::Resource;
/// use serde_json::json;
///
/// let mut resource = Resource::new("us-east-1").unwrap();
/// resource.set_attribute("region", json!("us-east"));
/// assert_eq!(resource.get_attribute("region"), Some(&json!("us-east")));
/// assert_eq!(resource.get_attribute("zone"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    name: String,
    attributes: Attributes,
    pub(crate) children: IndexMap<String, ResourceId>,
    pub(crate) parent: Option<ResourceId>,
}

impl Resource {
    /// Create a detached resource with no attributes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`](crate::Error::InvalidName) if the name
    /// is empty or contains `/`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_attributes(name, Attributes::new())
    }

    /// Create a detached resource with initial attributes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`](crate::Error::InvalidName) if the name
    /// is empty or contains `/`.
    pub fn with_attributes(name: impl Into<String>, attributes: Attributes) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self::unchecked(name, attributes))
    }

    /// Build a resource from a name that is already known to be valid.
    pub(crate) fn unchecked(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            attributes,
            children: IndexMap::new(),
            parent: None,
        }
    }

    /// The resource's name (unique among its siblings).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// The resource's own attributes.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Look up a local attribute.
    ///
    /// `None` means the key was never set; `Some(Value::Null)` means it was
    /// explicitly set to null.
    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Check whether a key is set locally (null counts as set).
    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Insert or overwrite an attribute, returning the previous value.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.attributes.insert(key.into(), value)
    }

    /// Remove an attribute if present, returning it.
    pub fn delete_attribute(&mut self, key: &str) -> Option<Value> {
        self.attributes.shift_remove(key)
    }

    /// Handle of the parent, `None` for a root or detached resource.
    #[must_use]
    pub fn parent_id(&self) -> Option<ResourceId> {
        self.parent
    }

    /// Handle of the named child.
    #[must_use]
    pub fn child_id(&self, name: &str) -> Option<ResourceId> {
        self.children.get(name).copied()
    }

    /// Child names in insertion order.
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// Number of direct children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
