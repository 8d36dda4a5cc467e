//! Resource path handling.
//!
//! Paths are the sole addressing scheme of an hrcp tree: root-relative,
//! `/`-separated, case-sensitive, no trailing slash, segments matching
//! `[^/]+`. The first segment is the name of the tree's root resource.
//!
//! # Normalization
//!
//! [`normalize::normalize`] collapses repeated separators and strips a
//! trailing one; anything that does not start with `/` is rejected.
//!
//! ```
//! use hrcp::path::normalize::{normalize, parent_of, split};
//!
//! assert_eq!(normalize("/org//team/").unwrap(), "/org/team");
//! assert_eq!(split("/org/team"), vec!["org", "team"]);
//! assert_eq!(parent_of("/org/team").as_deref(), Some("/org"));
//! ```
//!
//! # Path Relationships
//!
//! ```
//! use hrcp::path::PathRelationship;
//!
//! let rel = PathRelationship::between("/org", "/org/team");
//! assert_eq!(rel, PathRelationship::Ancestor);
//! assert!(rel.is_hierarchical());
//! ```

pub mod normalize;
pub mod relationship;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use normalize::{basename, join, normalize, parent_of, split, validate_name, SEPARATOR};
pub use relationship::PathRelationship;
