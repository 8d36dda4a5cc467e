//! Attribute propagation.
//!
//! A [`PropagationMode`] selects how the effective value of an attribute is
//! computed from the tree's structure. Resolution is stateless: every call
//! walks the ancestor chain or the descendant subtree afresh.
//!
//! Explicitly null attributes never contribute a value, except that
//! `RequirePath` sees them as falsy and `CollectAncestors` reports them as
//! unset levels.
//!
//! # Examples
//!
//! ```
//! use hrcp::{PropagationMode, ResourceTree};
//! use serde_json::json;
//!
//! let mut tree = ResourceTree::new("platform").unwrap();
//! tree.create("/platform/us-east/db", None).unwrap();
//! tree.set_attribute("/platform", "timeout", json!(30)).unwrap();
//!
//! let value = tree
//!     .resolve("/platform/us-east/db", "timeout", PropagationMode::Inherit)
//!     .unwrap();
//! assert_eq!(value, Some(json!(30)));
//! ```

mod merge;
mod provenance;
mod resolver;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use merge::{merge, Merged};
pub use provenance::Provenance;
pub use resolver::{
    aggregate, collect_ancestors, inherit, local, require_path, resolve, resolve_with_provenance,
};

/// Strategy used to resolve an attribute's effective value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropagationMode {
    /// Local value only.
    #[default]
    None,
    /// Nearest ancestor-or-self wins.
    Inherit,
    /// Every value in the subtree, depth-first.
    Aggregate,
    /// Recursive mapping merge from root to resource, closest wins.
    Merge,
    /// Local value, only if every level up to the root is truthy.
    RequirePath,
    /// Each level's local value, resource first, root last.
    CollectAncestors,
}

impl PropagationMode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Inherit,
        Self::Aggregate,
        Self::Merge,
        Self::RequirePath,
        Self::CollectAncestors,
    ];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Inherit => "inherit",
            Self::Aggregate => "aggregate",
            Self::Merge => "merge",
            Self::RequirePath => "require_path",
            Self::CollectAncestors => "collect_ancestors",
        }
    }
}

impl fmt::Display for PropagationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropagationMode {
    type Err = String;

    /// Parses a mode name, case-insensitively; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| format!("invalid propagation mode: {s}"))
    }
}

/// Truthiness used by `RequirePath`.
///
/// Null, `false`, zero, the empty string, the empty array and the empty
/// object are falsy; everything else is truthy.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
