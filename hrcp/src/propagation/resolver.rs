//! Mode dispatch and the per-mode walks.

use serde_json::Value;

use super::merge::merge;
use super::provenance::Provenance;
use super::{is_truthy, PropagationMode};
use crate::tree::ResourceRef;

/// The resource's own non-null value for `key`.
#[must_use]
pub fn local<'a>(resource: ResourceRef<'a>, key: &str) -> Option<&'a Value> {
    resource.get_attribute(key).filter(|value| !value.is_null())
}

/// Nearest ancestor-or-self holding a value for `key`, with that value.
#[must_use]
pub fn inherit<'a>(resource: ResourceRef<'a>, key: &str) -> Option<(ResourceRef<'a>, &'a Value)> {
    resource
        .ancestors()
        .find_map(|level| local(level, key).map(|value| (level, value)))
}

/// Every resource in the subtree (inclusive) holding a value for `key`,
/// in depth-first pre-order.
#[must_use]
pub fn aggregate<'a>(resource: ResourceRef<'a>, key: &str) -> Vec<(ResourceRef<'a>, &'a Value)> {
    resource
        .walk()
        .filter_map(|node| local(node, key).map(|value| (node, value)))
        .collect()
}

/// The resource's local value, provided every level up to the root holds a
/// truthy value for `key`.
///
/// A missing local value counts as falsy, so the result is `None`.
#[must_use]
pub fn require_path<'a>(resource: ResourceRef<'a>, key: &str) -> Option<&'a Value> {
    resource
        .ancestors()
        .all(|level| level.get_attribute(key).is_some_and(is_truthy))
        .then(|| resource.get_attribute(key))
        .flatten()
}

/// Each level's local value from the resource (first) to the root (last);
/// `None` marks levels without a value.
#[must_use]
pub fn collect_ancestors<'a>(resource: ResourceRef<'a>, key: &str) -> Vec<Option<&'a Value>> {
    resource.ancestors().map(|level| local(level, key)).collect()
}

fn collected_value(levels: Vec<Option<&Value>>) -> Option<Value> {
    if levels.iter().all(Option::is_none) {
        return None;
    }
    Some(Value::Array(
        levels
            .into_iter()
            .map(|level| level.cloned().unwrap_or(Value::Null))
            .collect(),
    ))
}

/// Effective value of `key` at `resource` under `mode`.
///
/// `Aggregate` always yields an array, empty when nothing was found.
/// `CollectAncestors` yields an array with `null` placeholders, or `None`
/// when no level has a value.
#[must_use]
pub fn resolve(resource: ResourceRef<'_>, key: &str, mode: PropagationMode) -> Option<Value> {
    log::trace!("Resolving '{key}' at {} ({mode})", resource.path());
    match mode {
        PropagationMode::None => local(resource, key).cloned(),
        PropagationMode::Inherit => inherit(resource, key).map(|(_, value)| value.clone()),
        PropagationMode::Aggregate => Some(Value::Array(
            aggregate(resource, key)
                .into_iter()
                .map(|(_, value)| value.clone())
                .collect(),
        )),
        PropagationMode::Merge => merge(resource, key).map(|merged| merged.value),
        PropagationMode::RequirePath => require_path(resource, key).cloned(),
        PropagationMode::CollectAncestors => collected_value(collect_ancestors(resource, key)),
    }
}

/// Like [`resolve`], but also reports which resources supplied the value.
///
/// Returns `None` whenever nothing was found, including an empty
/// aggregation.
#[must_use]
pub fn resolve_with_provenance(
    resource: ResourceRef<'_>,
    key: &str,
    mode: PropagationMode,
) -> Option<Provenance> {
    log::trace!(
        "Resolving '{key}' with provenance at {} ({mode})",
        resource.path()
    );
    match mode {
        PropagationMode::None => {
            local(resource, key).map(|value| Provenance::new(value.clone(), resource.path(), mode))
        }
        PropagationMode::Inherit => inherit(resource, key)
            .map(|(source, value)| Provenance::new(value.clone(), source.path(), mode)),
        PropagationMode::Aggregate => {
            let found = aggregate(resource, key);
            if found.is_empty() {
                return None;
            }
            let (paths, values): (Vec<_>, Vec<_>) = found
                .into_iter()
                .map(|(node, value)| (node.path(), value.clone()))
                .unzip();
            let mut provenance = Provenance::new(Value::Array(values), resource.path(), mode);
            provenance.contributing_paths = Some(paths);
            Some(provenance)
        }
        PropagationMode::Merge => merge(resource, key).map(|merged| {
            let mut provenance = Provenance::new(merged.value, merged.source_path, mode);
            provenance.key_sources = Some(merged.key_sources);
            provenance
        }),
        PropagationMode::RequirePath => require_path(resource, key)
            .map(|value| Provenance::new(value.clone(), resource.path(), mode)),
        PropagationMode::CollectAncestors => collected_value(collect_ancestors(resource, key))
            .map(|value| Provenance::new(value, resource.path(), mode)),
    }
}
