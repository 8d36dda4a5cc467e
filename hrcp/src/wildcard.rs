//! Wildcard path patterns.
//!
//! A pattern is an absolute path whose segments may be:
//!
//! - a literal name, matched exactly (case-sensitive)
//! - `*`, matching exactly one segment
//! - `**`, matching zero or more segments
//! - a name containing `*`, such as `server*`, where each `*` matches any run
//!   of characters inside that one segment
//!
//! Matching is segment-wise backtracking, memoized on
//! (pattern position, path position) so nested `**` stays polynomial.
//!
//! # Examples
//!
//! ```
//! use hrcp::wildcard::Pattern;
//!
//! let pattern = Pattern::parse("/infra/**/server*").unwrap();
//! assert!(pattern.matches("/infra/server1"));
//! assert!(pattern.matches("/infra/us/dc1/server-a"));
//! assert!(!pattern.matches("/infra/us/db"));
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::path::{join, split, SEPARATOR};
use crate::propagation::{resolve, PropagationMode};
use crate::tree::{ResourceRef, ResourceTree};

const ANY: &str = "*";
const RECURSIVE: &str = "**";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// Text pieces around the `*`s of a segment glob (at least two).
    Glob(Vec<String>),
    Any,
    Recursive,
}

impl Segment {
    fn parse(text: &str) -> Self {
        match text {
            RECURSIVE => Self::Recursive,
            ANY => Self::Any,
            _ if text.contains('*') => Self::Glob(text.split('*').map(str::to_string).collect()),
            _ => Self::Literal(text.to_string()),
        }
    }

    fn matches_one(&self, segment: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == segment,
            Self::Glob(parts) => glob_matches(parts, segment),
            Self::Any => !segment.is_empty(),
            Self::Recursive => true,
        }
    }
}

/// Match a single segment against glob pieces split on `*`.
fn glob_matches(parts: &[String], text: &str) -> bool {
    let Some((first, rest)) = parts.split_first() else {
        return text.is_empty();
    };
    let Some(remaining) = text.strip_prefix(first.as_str()) else {
        return false;
    };
    let Some((last, middle)) = rest.split_last() else {
        return remaining.is_empty();
    };

    let mut remaining = remaining;
    for part in middle {
        match remaining.find(part.as_str()) {
            Some(index) => remaining = &remaining[index + part.len()..],
            None => return false,
        }
    }
    remaining.ends_with(last.as_str())
}

/// A compiled wildcard pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// Duplicate and trailing separators are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the pattern does not start with `/`.
    pub fn parse(pattern: &str) -> Result<Self> {
        if !pattern.starts_with(SEPARATOR) {
            return Err(Error::invalid_path(pattern, "pattern must start with '/'"));
        }
        let parts = split(pattern);
        Ok(Self {
            source: join(&parts),
            segments: parts.into_iter().map(Segment::parse).collect(),
        })
    }

    /// The normalized pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern has no wildcards at all.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Literal(_)))
    }

    /// Test an absolute path against the pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let segments = split(path);
        Matcher::new(&self.segments, &segments).matches(0, 0)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

struct Matcher<'p, 's> {
    pattern: &'p [Segment],
    path: &'s [&'s str],
    memo: Vec<Option<bool>>,
}

impl<'p, 's> Matcher<'p, 's> {
    fn new(pattern: &'p [Segment], path: &'s [&'s str]) -> Self {
        Self {
            pattern,
            path,
            memo: vec![None; (pattern.len() + 1) * (path.len() + 1)],
        }
    }

    fn matches(&mut self, pi: usize, si: usize) -> bool {
        let slot = pi * (self.path.len() + 1) + si;
        if let Some(known) = self.memo[slot] {
            return known;
        }

        let result = match self.pattern.get(pi) {
            None => si == self.path.len(),
            // Longest consumption first, backing off one segment at a time.
            Some(Segment::Recursive) => (si..=self.path.len())
                .rev()
                .any(|next| self.matches(pi + 1, next)),
            Some(segment) => {
                si < self.path.len()
                    && segment.matches_one(self.path[si])
                    && self.matches(pi + 1, si + 1)
            }
        };

        self.memo[slot] = Some(result);
        result
    }
}

/// Check whether `path` matches `pattern`.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the pattern is malformed.
pub fn match_pattern(path: &str, pattern: &str) -> Result<bool> {
    Ok(Pattern::parse(pattern)?.matches(path))
}

/// Every resource whose path matches `pattern`, in depth-first order.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the pattern is malformed.
pub fn query<'a>(tree: &'a ResourceTree, pattern: &str) -> Result<Vec<ResourceRef<'a>>> {
    let pattern = Pattern::parse(pattern)?;
    let matches: Vec<_> = if pattern.is_literal() {
        tree.get(pattern.as_str()).into_iter().collect()
    } else {
        tree.walk()
            .filter(|resource| pattern.matches(&resource.path()))
            .collect()
    };
    log::debug!("Pattern {pattern} matched {} resource(s)", matches.len());
    Ok(matches)
}

/// Resolve `key` under `mode` for every resource matching `pattern`.
///
/// Resources that resolve to nothing are skipped. Aggregated lists are
/// flattened into the output.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the pattern is malformed.
pub fn query_values(
    tree: &ResourceTree,
    pattern: &str,
    key: &str,
    mode: PropagationMode,
) -> Result<Vec<Value>> {
    let mut values = Vec::new();
    for resource in query(tree, pattern)? {
        match resolve(resource, key, mode) {
            Some(Value::Array(items)) if mode == PropagationMode::Aggregate => values.extend(items),
            Some(value) => values.push(value),
            None => {}
        }
    }
    Ok(values)
}
