//! Resource path normalization functions.
//!
//! Resource paths are `/`-separated, case-sensitive and absolute: the first
//! segment is always the tree's root name (`/platform/us-east/api`). The
//! functions in this module are pure string manipulations; none of them
//! consult a tree.

use crate::error::{Error, Result};

/// The path separator character.
pub const SEPARATOR: char = '/';

/// Normalize a resource path to its canonical form.
///
/// Collapses repeated separators and drops a trailing separator. The bare
/// separator `"/"` normalizes to itself.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the path is empty or does not start
/// with `/`.
///
/// # Examples
///
/// ```
/// use hrcp::path::normalize::normalize;
///
/// assert_eq!(normalize("/org//team/").unwrap(), "/org/team");
/// assert_eq!(normalize("/").unwrap(), "/");
/// assert!(normalize("org/team").is_err());
/// ```
pub fn normalize(path: &str) -> Result<String> {
    if path.is_empty() {
        return Err(Error::invalid_path(path, "path cannot be empty"));
    }
    if !path.starts_with(SEPARATOR) {
        return Err(Error::invalid_path(path, "path must start with '/'"));
    }
    Ok(join(split(path)))
}

/// Split a path into its segments.
///
/// Empty segments produced by repeated or trailing separators are dropped.
///
/// # Examples
///
/// ```
/// use hrcp::path::normalize::split;
///
/// assert_eq!(split("/org/team/alice"), vec!["org", "team", "alice"]);
/// assert_eq!(split("//org///team/"), vec!["org", "team"]);
/// assert!(split("/").is_empty());
/// ```
#[must_use]
pub fn split(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// Join segments into a canonical path.
///
/// Each segment may itself contain separators; they are split and
/// re-joined so the result never has empty segments.
///
/// # Examples
///
/// ```
/// use hrcp::path::normalize::join;
///
/// assert_eq!(join(["org", "team"]), "/org/team");
/// assert_eq!(join(["/org/", "team/alice"]), "/org/team/alice");
/// assert_eq!(join(Vec::<&str>::new()), "/");
/// ```
pub fn join<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for segment in segments {
        for part in split(segment.as_ref()) {
            out.push(SEPARATOR);
            out.push_str(part);
        }
    }
    if out.is_empty() {
        out.push(SEPARATOR);
    }
    out
}

/// Get the parent of a path.
///
/// Returns `None` for a root path (zero or one segment).
///
/// # Examples
///
/// ```
/// use hrcp::path::normalize::parent_of;
///
/// assert_eq!(parent_of("/org/team/alice").as_deref(), Some("/org/team"));
/// assert_eq!(parent_of("/org"), None);
/// ```
#[must_use]
pub fn parent_of(path: &str) -> Option<String> {
    let segments = split(path);
    if segments.len() <= 1 {
        return None;
    }
    Some(join(&segments[..segments.len() - 1]))
}

/// Get the last segment of a path.
///
/// # Examples
///
/// ```
/// use hrcp::path::normalize::basename;
///
/// assert_eq!(basename("/org/team/alice"), Some("alice"));
/// assert_eq!(basename("/"), None);
/// ```
#[must_use]
pub fn basename(path: &str) -> Option<&str> {
    split(path).pop()
}

/// Check that a string is usable as a resource name.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] if the name is empty or contains `/`.
///
/// # Examples
///
/// ```
/// use hrcp::path::normalize::validate_name;
///
/// assert!(validate_name("us-east-1").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name("a/b").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "name cannot be empty".to_string(),
        });
    }
    if name.contains(SEPARATOR) {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "name cannot contain '/'".to_string(),
        });
    }
    Ok(())
}
