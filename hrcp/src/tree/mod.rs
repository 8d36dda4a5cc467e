//! The resource tree.
//!
//! A [`ResourceTree`] owns every resource in a generational arena. The root
//! is created with the tree and can never be deleted, renamed or moved.
//! Resources are addressed by absolute paths beginning with `"/" + root_name`
//! (the bare `"/"` is accepted as an alias for the root).
//!
//! # Examples
//!
//! ```
//! use hrcp::ResourceTree;
//! use serde_json::json;
//!
//! let mut tree = ResourceTree::new("platform").unwrap();
//! tree.create("/platform/us-east/api", None).unwrap();
//! tree.set_attribute("/platform", "timeout", json!(30)).unwrap();
//!
//! // Intermediate resources are created like `mkdir -p`.
//! assert!(tree.get("/platform/us-east").is_some());
//! assert_eq!(tree.len(), 3);
//! ```

mod arena;
mod view;
mod walk;

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::path::{normalize, split, validate_name};
use crate::propagation::{self, PropagationMode, Provenance};
use crate::resource::{Attributes, Resource, ResourceId};
use crate::schema::{PropertySchema, SchemaRegistry};
use crate::serialization::ResourceRecord;
use crate::wildcard;

use arena::Arena;
pub use view::{Ancestors, Children, ResourceRef};
pub use walk::Walk;

/// A tree of resources with a fixed root.
#[derive(Debug, Clone)]
pub struct ResourceTree {
    arena: Arena,
    root: ResourceId,
    schema: SchemaRegistry,
}

impl ResourceTree {
    /// Create a tree containing only a root resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if `root_name` is not a valid name.
    pub fn new(root_name: impl Into<String>) -> Result<Self> {
        Self::with_schema(root_name, SchemaRegistry::new())
    }

    /// Create a tree whose attribute writes are checked against `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if `root_name` is not a valid name.
    pub fn with_schema(root_name: impl Into<String>, schema: SchemaRegistry) -> Result<Self> {
        let mut arena = Arena::default();
        let root = arena.insert(Resource::new(root_name)?);
        Ok(Self {
            arena,
            root,
            schema,
        })
    }

    /// The root resource.
    #[must_use]
    pub fn root(&self) -> ResourceRef<'_> {
        ResourceRef::new(self, self.root)
    }

    /// Handle of the root resource.
    #[must_use]
    pub const fn root_id(&self) -> ResourceId {
        self.root
    }

    /// Name of the root resource.
    #[must_use]
    pub fn root_name(&self) -> &str {
        self.arena[self.root].name()
    }

    /// Number of resources, root included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.arena.len()
    }

    /// Always `false`: a tree has at least its root.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// View a resource by handle; `None` if the handle is stale.
    #[must_use]
    pub fn resource(&self, id: ResourceId) -> Option<ResourceRef<'_>> {
        self.arena
            .contains(id)
            .then(|| ResourceRef::new(self, id))
    }

    /// Resolve a path to a handle, surfacing malformed paths as errors.
    ///
    /// Returns `Ok(None)` when the path is well-formed but nothing lives
    /// there.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the path is malformed or does not
    /// begin with the root's path.
    pub fn lookup(&self, path: &str) -> Result<Option<ResourceId>> {
        let normalized = normalize(path)?;
        let segments = self.segments_below_root(&normalized)?;

        let mut current = self.root;
        for segment in segments {
            match self.arena[current].child_id(segment) {
                Some(id) => current = id,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Handle of the resource at `path`, `None` if absent or malformed.
    #[must_use]
    pub fn id_of(&self, path: &str) -> Option<ResourceId> {
        self.lookup(path).ok().flatten()
    }

    /// The resource at `path`, or `None`.
    ///
    /// Lookups never fail: a path outside this tree simply finds nothing.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<ResourceRef<'_>> {
        self.id_of(path).map(|id| ResourceRef::new(self, id))
    }

    /// Mutable access to the resource at `path`.
    ///
    /// Attribute writes made through the returned reference bypass schema
    /// validation.
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Resource> {
        let id = self.id_of(path)?;
        self.arena.get_mut(id)
    }

    /// Whether a resource exists at `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.id_of(path).is_some()
    }

    /// Create the resource at `path`, creating missing ancestors.
    ///
    /// Every attribute is validated against the schema before any resource
    /// is created, so a rejected call leaves the tree unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPath`] if the path is malformed or outside the tree
    /// - [`Error::AlreadyExists`] if the terminal resource already exists
    /// - [`Error::Validation`] if an attribute fails the schema
    pub fn create(&mut self, path: &str, attributes: Option<Attributes>) -> Result<ResourceId> {
        let normalized = normalize(path)?;
        let segments = self.segments_below_root(&normalized)?;
        let Some((last, intermediate)) = segments.split_last() else {
            return Err(Error::AlreadyExists { path: normalized });
        };

        let attributes = attributes.unwrap_or_default();
        for (key, value) in &attributes {
            self.schema.validate(key, value, Some(normalized.as_str()))?;
        }

        let mut current = self.root;
        let mut missing = intermediate.len();
        for (index, segment) in intermediate.iter().enumerate() {
            match self.arena[current].child_id(segment) {
                Some(id) => current = id,
                None => {
                    missing = index;
                    break;
                }
            }
        }
        if missing == intermediate.len() && self.arena[current].child_id(last).is_some() {
            return Err(Error::AlreadyExists { path: normalized });
        }

        for segment in &intermediate[missing..] {
            current = self.insert_child(current, Resource::unchecked(*segment, Attributes::new()));
            log::trace!("Created intermediate resource '{segment}'");
        }
        let id = self.insert_child(current, Resource::unchecked(*last, attributes));
        log::debug!("Created resource {normalized}");
        Ok(id)
    }

    /// Delete the resource at `path` together with its subtree.
    ///
    /// Returns the detached subtree as a record.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPath`] if the path is malformed or outside the tree
    /// - [`Error::RootModification`] if `path` is the root
    /// - [`Error::NotFound`] if nothing exists at `path`
    pub fn delete(&mut self, path: &str) -> Result<ResourceRecord> {
        let normalized = normalize(path)?;
        let id = self
            .lookup(&normalized)?
            .ok_or_else(|| Error::not_found(&normalized))?;
        if id == self.root {
            return Err(Error::RootModification {
                operation: "delete".to_string(),
            });
        }
        let record = self.detach(id);
        log::debug!("Deleted resource {normalized}");
        Ok(record)
    }

    /// Pre-order traversal of the whole tree, root first.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self, self.root)
    }

    /// Pre-order traversal of the subtree at `start_path`, inclusive.
    ///
    /// Returns `None` if no resource exists there.
    #[must_use]
    pub fn walk_from(&self, start_path: &str) -> Option<Walk<'_>> {
        self.id_of(start_path).map(|id| Walk::new(self, id))
    }

    /// Attach a new, empty-childed resource under `parent`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if `parent` is stale
    /// - [`Error::InvalidName`] if `name` is invalid
    /// - [`Error::DuplicateName`] if the parent already has a child `name`
    /// - [`Error::Validation`] if an attribute fails the schema
    pub fn add_child(
        &mut self,
        parent: ResourceId,
        name: &str,
        attributes: Attributes,
    ) -> Result<ResourceId> {
        let parent_path = self.path_of(parent)?;
        validate_name(name)?;
        if self.arena[parent].child_id(name).is_some() {
            return Err(Error::DuplicateName {
                parent: parent_path,
                name: name.to_string(),
            });
        }
        let path = crate::path::join([parent_path.as_str(), name]);
        for (key, value) in &attributes {
            self.schema.validate(key, value, Some(path.as_str()))?;
        }

        let id = self.insert_child(parent, Resource::unchecked(name, attributes));
        log::debug!("Added child {path}");
        Ok(id)
    }

    /// Detach the named child of `parent` and return its subtree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `parent` is stale or has no such child.
    pub fn remove_child(&mut self, parent: ResourceId, name: &str) -> Result<ResourceRecord> {
        let parent_path = self.path_of(parent)?;
        let child = self.arena[parent]
            .child_id(name)
            .ok_or_else(|| Error::not_found(crate::path::join([parent_path.as_str(), name])))?;
        let record = self.detach(child);
        log::debug!("Removed child '{name}' from {parent_path}");
        Ok(record)
    }

    /// Rebuild a detached subtree under `parent`.
    ///
    /// The whole record is checked first so a rejected call leaves the tree
    /// unchanged. Attribute values are not schema-checked.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if `parent` is stale
    /// - [`Error::InvalidName`] / [`Error::DuplicateName`] for bad names in
    ///   the record or a collision with an existing child
    pub fn attach(&mut self, parent: ResourceId, record: &ResourceRecord) -> Result<ResourceId> {
        let parent_path = self.path_of(parent)?;
        record.validate()?;
        if self.arena[parent].child_id(&record.name).is_some() {
            return Err(Error::DuplicateName {
                parent: parent_path,
                name: record.name.clone(),
            });
        }
        let id = self.insert_record(parent, record);
        log::debug!("Attached '{}' under {parent_path}", record.name);
        Ok(id)
    }

    /// Set an attribute on the resource at `path` after schema validation.
    ///
    /// Returns the previous value. A rejected value leaves the resource
    /// untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPath`] for malformed paths
    /// - [`Error::NotFound`] if nothing exists at `path`
    /// - [`Error::Validation`] if the value fails the schema
    pub fn set_attribute(
        &mut self,
        path: &str,
        key: impl Into<String>,
        value: Value,
    ) -> Result<Option<Value>> {
        let key = key.into();
        let (id, normalized) = self.require(path)?;
        self.schema.validate(&key, &value, Some(normalized.as_str()))?;
        Ok(self.arena[id].set_attribute(key, value))
    }

    /// Remove an attribute from the resource at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] or [`Error::NotFound`] for bad paths.
    pub fn delete_attribute(&mut self, path: &str, key: &str) -> Result<Option<Value>> {
        let (id, _) = self.require(path)?;
        Ok(self.arena[id].delete_attribute(key))
    }

    /// Local value of `key`, falling back to the schema default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] or [`Error::NotFound`] for bad paths.
    pub fn get_attribute_or_default(&self, path: &str, key: &str) -> Result<Option<Value>> {
        let (id, _) = self.require(path)?;
        Ok(self.arena[id]
            .get_attribute(key)
            .or_else(|| self.schema.get_default(key))
            .cloned())
    }

    /// Register a schema for an attribute key.
    pub fn define(&mut self, key: impl Into<String>, schema: PropertySchema) {
        self.schema.define(key, schema);
    }

    /// The schema registry applied to attribute writes.
    #[must_use]
    pub const fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    /// Check every resource under `path` (default: root) against the schema.
    ///
    /// Returns resource paths mapped to their problems; an empty map means
    /// the subtree is valid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] or [`Error::NotFound`] for bad paths.
    pub fn validate_all(&self, path: Option<&str>) -> Result<BTreeMap<String, Vec<String>>> {
        let start = match path {
            Some(path) => self.require(path)?.0,
            None => self.root,
        };
        Ok(self.collect_problems(start))
    }

    /// Whether the whole tree satisfies the schema.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.collect_problems(self.root).is_empty()
    }

    /// Human-readable report of [`validate_all`](Self::validate_all).
    #[must_use]
    pub fn validation_summary(&self) -> String {
        let problems = self.collect_problems(self.root);
        if problems.is_empty() {
            return "All resources are valid.".to_string();
        }

        let count: usize = problems.values().map(Vec::len).sum();
        let mut out = format!(
            "{count} problem(s) in {} resource(s):\n",
            problems.len()
        );
        for (path, messages) in &problems {
            let _ = writeln!(out, "{path}:");
            for message in messages {
                let _ = writeln!(out, "  - {message}");
            }
        }
        out
    }

    /// Resources whose path matches a wildcard pattern.
    ///
    /// See [`wildcard::query`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the pattern is malformed.
    pub fn query(&self, pattern: &str) -> Result<Vec<ResourceRef<'_>>> {
        wildcard::query(self, pattern)
    }

    /// Resolved values of `key` for every resource matching `pattern`.
    ///
    /// See [`wildcard::query_values`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the pattern is malformed.
    pub fn query_values(&self, pattern: &str, key: &str, mode: PropagationMode) -> Result<Vec<Value>> {
        wildcard::query_values(self, pattern, key, mode)
    }

    /// Resolve `key` at `path` under `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] or [`Error::NotFound`] for bad paths;
    /// a missing value is `Ok(None)`.
    pub fn resolve(&self, path: &str, key: &str, mode: PropagationMode) -> Result<Option<Value>> {
        let (id, _) = self.require(path)?;
        Ok(propagation::resolve(ResourceRef::new(self, id), key, mode))
    }

    /// Resolve `key` at `path` and explain where the value came from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] or [`Error::NotFound`] for bad paths;
    /// a missing value is `Ok(None)`.
    pub fn resolve_with_provenance(
        &self,
        path: &str,
        key: &str,
        mode: PropagationMode,
    ) -> Result<Option<Provenance>> {
        let (id, _) = self.require(path)?;
        Ok(propagation::resolve_with_provenance(
            ResourceRef::new(self, id),
            key,
            mode,
        ))
    }

    /// Give a non-root resource a new name, keeping its sibling position.
    pub(crate) fn rename_resource(&mut self, id: ResourceId, new_name: String) -> Result<()> {
        let parent = self.arena[id].parent.ok_or_else(|| Error::RootModification {
            operation: "rename".to_string(),
        })?;
        let old_name = self.arena[id].name().to_string();
        let siblings = &mut self.arena[parent].children;
        if let Some(index) = siblings.get_index_of(&old_name) {
            siblings.shift_remove_index(index);
            siblings.shift_insert(index, new_name.clone(), id);
        }
        self.arena[id].set_name(new_name);
        Ok(())
    }

    fn segments_below_root<'p>(&self, normalized: &'p str) -> Result<Vec<&'p str>> {
        let mut segments = split(normalized);
        if segments.is_empty() {
            return Ok(segments);
        }
        if segments[0] != self.root_name() {
            return Err(Error::invalid_path(
                normalized,
                format!("path must start with '/{}'", self.root_name()),
            ));
        }
        segments.remove(0);
        Ok(segments)
    }

    fn require(&self, path: &str) -> Result<(ResourceId, String)> {
        let normalized = normalize(path)?;
        let id = self
            .lookup(&normalized)?
            .ok_or_else(|| Error::not_found(&normalized))?;
        Ok((id, normalized))
    }

    fn path_of(&self, id: ResourceId) -> Result<String> {
        self.resource(id)
            .map(|resource| resource.path())
            .ok_or_else(|| Error::not_found(id.to_string()))
    }

    fn insert_child(&mut self, parent: ResourceId, mut resource: Resource) -> ResourceId {
        resource.parent = Some(parent);
        let name = resource.name().to_string();
        let id = self.arena.insert(resource);
        self.arena[parent].children.insert(name, id);
        id
    }

    fn insert_record(&mut self, parent: ResourceId, record: &ResourceRecord) -> ResourceId {
        let id = self.insert_child(
            parent,
            Resource::unchecked(record.name.as_str(), record.attributes.clone()),
        );
        for child in record.children.values() {
            self.insert_record(id, child);
        }
        id
    }

    fn detach(&mut self, id: ResourceId) -> ResourceRecord {
        let record = ResourceRecord::from_resource(ResourceRef::new(self, id));
        let doomed: Vec<ResourceId> = Walk::new(self, id).map(|r| r.id()).collect();

        if let Some(parent) = self.arena[id].parent {
            let name = self.arena[id].name().to_string();
            self.arena[parent].children.shift_remove(&name);
        }
        for id in doomed {
            self.arena.remove(id);
        }
        record
    }

    fn collect_problems(&self, start: ResourceId) -> BTreeMap<String, Vec<String>> {
        let required = self.schema.required_fields();
        let mut problems = BTreeMap::new();

        for resource in Walk::new(self, start) {
            let path = resource.path();
            let mut messages = Vec::new();
            for key in &required {
                if !resource.has_attribute(key) {
                    messages.push(format!("missing required attribute '{key}'"));
                }
            }
            for (key, value) in resource.attributes() {
                if let Err(err) = self.schema.validate(key, value, Some(path.as_str())) {
                    messages.push(err.to_string());
                }
            }
            if !messages.is_empty() {
                problems.insert(path, messages);
            }
        }
        problems
    }
}
