//! Whole-subtree operations.
//!
//! These functions are built purely on the public [`ResourceTree`] API:
//! subtrees are snapshotted as [`ResourceRecord`]s and re-attached where
//! they belong. Every operation checks its preconditions before touching
//! the tree, so an error leaves the tree as it was.
//!
//! # Examples
//!
//! ```
//! use hrcp::{operations, ResourceTree};
//! use serde_json::json;
//!
//! let mut tree = ResourceTree::new("org").unwrap();
//! tree.create("/org/templates/web", None).unwrap();
//! tree.set_attribute("/org/templates/web", "replicas", json!(2)).unwrap();
//!
//! operations::copy(&mut tree, "/org/templates/web", "/org/prod/web").unwrap();
//! operations::rename(&mut tree, "/org/prod/web", "frontend").unwrap();
//!
//! let copied = tree.get("/org/prod/frontend").unwrap();
//! assert_eq!(copied.get_attribute("replicas"), Some(&json!(2)));
//! ```

use crate::error::{Error, Result};
use crate::path::{basename, join, normalize, parent_of, split, validate_name, PathRelationship};
use crate::resource::ResourceId;
use crate::serialization::{tree_from_record, ResourceRecord};
use crate::tree::{ResourceRef, ResourceTree};

/// An independent deep copy of `tree`, schema included.
#[must_use]
pub fn clone_tree(tree: &ResourceTree) -> ResourceTree {
    tree.clone()
}

/// A new tree whose root is a copy of the resource at `path`.
///
/// The new tree carries the source tree's schema definitions.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no resource exists at `path`.
pub fn clone_subtree(tree: &ResourceTree, path: &str) -> Result<ResourceTree> {
    let resource = tree.get(path).ok_or_else(|| Error::not_found(path))?;
    let mut cloned = tree_from_record(&ResourceRecord::from_resource(resource))?;
    for (key, schema) in tree.schema().iter() {
        cloned.define(key, schema.clone());
    }
    Ok(cloned)
}

/// Merge `source` into `target`.
///
/// The two roots are merged regardless of their names. Resources missing
/// from `target` are added, attributes present in `source` overwrite those
/// in `target`, and everything else in `target` is kept.
///
/// # Errors
///
/// Returns [`Error::Validation`] if a source attribute violates the
/// target's schema; nothing is merged in that case.
pub fn merge_trees(target: &mut ResourceTree, source: &ResourceTree) -> Result<()> {
    let target_root = target.root().path();
    for resource in source.walk() {
        let path = rebase(&resource.path(), &target_root);
        for (key, value) in resource.attributes() {
            target.schema().validate(key, value, Some(path.as_str()))?;
        }
    }

    let mut added = 0;
    merge_resource(target, &target_root, source.root(), &mut added)?;
    log::debug!(
        "Merged tree '{}' into '{}' ({added} subtree(s) added)",
        source.root_name(),
        target.root_name()
    );
    Ok(())
}

/// Re-root a source path under the target's root path.
fn rebase(source_path: &str, target_root: &str) -> String {
    let mut path = target_root.to_string();
    for segment in split(source_path).into_iter().skip(1) {
        path.push('/');
        path.push_str(segment);
    }
    path
}

fn merge_resource(
    target: &mut ResourceTree,
    target_path: &str,
    source: ResourceRef<'_>,
    added: &mut usize,
) -> Result<()> {
    let target_id = target
        .lookup(target_path)?
        .ok_or_else(|| Error::not_found(target_path))?;
    if let Some(resource) = target.get_mut(target_path) {
        for (key, value) in source.attributes() {
            resource.set_attribute(key.as_str(), value.clone());
        }
    }

    for child in source.children() {
        let child_path = join([target_path, child.name()]);
        if target.contains(&child_path) {
            merge_resource(target, &child_path, child, added)?;
        } else {
            target.attach(target_id, &ResourceRecord::from_resource(child))?;
            *added += 1;
        }
    }
    Ok(())
}

/// Where a copy or move will land.
struct Placement {
    source: String,
    parent: String,
    record: ResourceRecord,
}

fn plan_placement(tree: &ResourceTree, source_path: &str, dest_path: &str) -> Result<Placement> {
    let source = tree
        .lookup(source_path)?
        .and_then(|id| tree.resource(id))
        .ok_or_else(|| Error::not_found(source_path))?;
    let source_canonical = source.path();

    let dest = normalize(dest_path)?;
    if tree.lookup(&dest)?.is_some() {
        return Err(Error::AlreadyExists { path: dest });
    }
    if PathRelationship::is_within(&dest, &source_canonical) {
        return Err(Error::invalid_path(
            dest.as_str(),
            PathRelationship::between(&dest, &source_canonical)
                .description(&dest, &source_canonical),
        ));
    }

    let (Some(parent), Some(name)) = (parent_of(&dest), basename(&dest)) else {
        return Err(Error::invalid_path(dest.as_str(), "destination has no parent"));
    };
    validate_name(name)?;
    // The destination parent must be addressable inside this tree.
    tree.lookup(&parent)?;

    let mut record = ResourceRecord::from_resource(source);
    record.name = name.to_string();
    Ok(Placement {
        source: source_canonical,
        parent,
        record,
    })
}

fn place(tree: &mut ResourceTree, placement: &Placement) -> Result<ResourceId> {
    let parent_id = match tree.lookup(&placement.parent)? {
        Some(id) => id,
        None => tree.create(&placement.parent, None)?,
    };
    tree.attach(parent_id, &placement.record)
}

/// Copy the resource at `source_path` and its subtree to `dest_path`.
///
/// Missing parents of the destination are created. The copy shares nothing
/// with the original.
///
/// # Errors
///
/// - [`Error::NotFound`] if nothing exists at `source_path`
/// - [`Error::AlreadyExists`] if something already exists at `dest_path`
/// - [`Error::InvalidPath`] if `dest_path` is malformed, outside the tree,
///   or inside the source subtree
pub fn copy(tree: &mut ResourceTree, source_path: &str, dest_path: &str) -> Result<ResourceId> {
    let placement = plan_placement(tree, source_path, dest_path)?;
    let id = place(tree, &placement)?;
    log::debug!("Copied {} under {}", placement.source, placement.parent);
    Ok(id)
}

/// Move the resource at `source_path` and its subtree to `dest_path`.
///
/// # Errors
///
/// Everything [`copy`] can return, plus [`Error::RootModification`] when
/// `source_path` is the root.
pub fn move_resource(
    tree: &mut ResourceTree,
    source_path: &str,
    dest_path: &str,
) -> Result<ResourceId> {
    if tree.lookup(source_path)? == Some(tree.root_id()) {
        return Err(Error::RootModification {
            operation: "move".to_string(),
        });
    }
    let placement = plan_placement(tree, source_path, dest_path)?;
    let id = place(tree, &placement)?;
    tree.delete(&placement.source)?;
    log::debug!("Moved {} under {}", placement.source, placement.parent);
    Ok(id)
}

/// Give the resource at `path` a new name, keeping its position among its
/// siblings and its whole subtree.
///
/// # Errors
///
/// - [`Error::NotFound`] if nothing exists at `path`
/// - [`Error::RootModification`] if `path` is the root
/// - [`Error::InvalidName`] if `new_name` is not a valid name
/// - [`Error::DuplicateName`] if a sibling already uses `new_name`
pub fn rename(tree: &mut ResourceTree, path: &str, new_name: &str) -> Result<ResourceId> {
    let resource = tree
        .lookup(path)?
        .and_then(|id| tree.resource(id))
        .ok_or_else(|| Error::not_found(path))?;
    let id = resource.id();
    let Some(parent) = resource.parent() else {
        return Err(Error::RootModification {
            operation: "rename".to_string(),
        });
    };
    validate_name(new_name)?;
    if resource.name() == new_name {
        return Ok(id);
    }
    if parent.child(new_name).is_some() {
        return Err(Error::DuplicateName {
            parent: parent.path(),
            name: new_name.to_string(),
        });
    }
    let old_path = resource.path();
    tree.rename_resource(id, new_name.to_string())?;
    log::debug!("Renamed {old_path} to '{new_name}'");
    Ok(id)
}
