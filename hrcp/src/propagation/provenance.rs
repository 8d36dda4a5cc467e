//! Provenance records.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::PropagationMode;

/// Explanation of where a resolved value came from.
///
/// A provenance is only produced when a value was found; absence is
/// reported as `None` by the resolver, never as a provenance with a null
/// value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provenance {
    /// The resolved value.
    pub value: Value,
    /// The resource authoritative for this resolution (meaning depends on
    /// the mode).
    pub source_path: String,
    /// Mode that produced the value.
    pub mode: PropagationMode,
    /// `Merge` only: dot-joined leaf key to the path that supplied it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_sources: Option<IndexMap<String, String>>,
    /// `Aggregate` only: every path that had the key, depth-first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributing_paths: Option<Vec<String>>,
}

impl Provenance {
    pub(crate) fn new(value: Value, source_path: String, mode: PropagationMode) -> Self {
        Self {
            value,
            source_path,
            mode,
            key_sources: None,
            contributing_paths: None,
        }
    }

    /// Path that supplied a merged leaf, e.g. `key_source("db.host")`.
    #[must_use]
    pub fn key_source(&self, key_path: &str) -> Option<&str> {
        self.key_sources
            .as_ref()
            .and_then(|sources| sources.get(key_path))
            .map(String::as_str)
    }
}
