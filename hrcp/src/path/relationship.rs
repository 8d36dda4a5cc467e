//! Path relationship checking.
//!
//! This module determines how two resource paths relate to each other in
//! the tree hierarchy. Comparison is segment-wise: `/a/b` is not an
//! ancestor of `/a/bc`.

use super::normalize::split;

/// Relationship between two resource paths.
///
/// # Examples
///
/// ```
/// use hrcp::path::PathRelationship;
///
/// assert_eq!(
///     PathRelationship::between("/org", "/org/team"),
///     PathRelationship::Ancestor
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The first path is an ancestor of the second.
    Ancestor,

    /// The first path is a descendant of the second.
    Descendant,

    /// The paths address the same resource.
    Same,

    /// Neither path is an ancestor or descendant of the other.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two paths.
    ///
    /// Both paths are compared by segments, so duplicate or trailing
    /// separators do not affect the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use hrcp::path::PathRelationship;
    ///
    /// assert_eq!(PathRelationship::between("/a/b", "/a"), PathRelationship::Descendant);
    /// assert_eq!(PathRelationship::between("/a/", "/a"), PathRelationship::Same);
    /// assert_eq!(PathRelationship::between("/a/b", "/a/bc"), PathRelationship::Unrelated);
    /// ```
    #[must_use]
    pub fn between(path1: &str, path2: &str) -> Self {
        let p1 = split(path1);
        let p2 = split(path2);

        if p1 == p2 {
            return Self::Same;
        }
        if p2.starts_with(&p1) {
            return Self::Ancestor;
        }
        if p1.starts_with(&p2) {
            return Self::Descendant;
        }
        Self::Unrelated
    }

    /// Check if the relationship is hierarchical (not unrelated).
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        matches!(self, Self::Ancestor | Self::Descendant | Self::Same)
    }

    /// Check if `path` is `other` or lies beneath it.
    ///
    /// # Examples
    ///
    /// ```
    /// use hrcp::path::PathRelationship;
    ///
    /// assert!(PathRelationship::is_within("/a/b/c", "/a/b"));
    /// assert!(PathRelationship::is_within("/a/b", "/a/b"));
    /// assert!(!PathRelationship::is_within("/a", "/a/b"));
    /// ```
    #[must_use]
    pub fn is_within(path: &str, other: &str) -> bool {
        matches!(Self::between(path, other), Self::Descendant | Self::Same)
    }

    /// Get a human-readable description of the relationship.
    #[must_use]
    pub fn description(&self, path1: &str, path2: &str) -> String {
        match self {
            Self::Ancestor => format!("{path1} is an ancestor of {path2}"),
            Self::Descendant => format!("{path1} is a descendant of {path2}"),
            Self::Same => format!("{path1} and {path2} are the same path"),
            Self::Unrelated => format!("{path1} and {path2} are unrelated paths"),
        }
    }
}
