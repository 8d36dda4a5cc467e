//! Error types for the hrcp library.
//!
//! This module provides the error hierarchy for all tree, path, schema and
//! serialization operations, using `thiserror` for ergonomic error handling.
//!
//! Resolution never fails because a value is missing: absence is reported
//! as `None`. Errors are reserved for caller mistakes (bad paths, duplicate
//! names, invalid values) and for I/O or parse failures.

use thiserror::Error;

/// Result type alias for operations that may fail with an hrcp error.
///
/// # Examples
///
/// ```
/// use hrcp::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the hrcp library.
#[derive(Debug, Error)]
pub enum Error {
    /// A path argument is malformed or does not start with the tree's root.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path.
        path: String,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A resource name is empty or contains the path separator.
    #[error("invalid name '{name}': {reason}")]
    InvalidName {
        /// The offending name.
        name: String,
        /// The reason the name is invalid.
        reason: String,
    },

    /// `create` targeted a path whose resource already exists.
    #[error("resource already exists at '{path}'")]
    AlreadyExists {
        /// The path that already exists.
        path: String,
    },

    /// An operation targeted a path with no resource.
    #[error("no resource at '{path}'")]
    NotFound {
        /// The path that was not found.
        path: String,
    },

    /// A child with the same name already exists under the parent.
    #[error("child '{name}' already exists under '{parent}'")]
    DuplicateName {
        /// Path of the parent resource.
        parent: String,
        /// The duplicate child name.
        name: String,
    },

    /// An attribute value was rejected by the schema.
    #[error("validation error for {}: {message}", describe_location(.key, .path.as_deref()))]
    Validation {
        /// The attribute key that failed validation.
        key: String,
        /// The resource path, when known.
        path: Option<String>,
        /// A description of the validation failure.
        message: String,
    },

    /// The tree root cannot be deleted, renamed, moved or re-parented.
    #[error("cannot {operation} the root resource")]
    RootModification {
        /// The operation that was attempted.
        operation: String,
    },

    /// Serialized tree data has the wrong shape.
    #[error("malformed tree data: {reason}")]
    Malformed {
        /// Details about the malformation.
        reason: String,
    },

    /// A configuration value is invalid.
    #[error("configuration error for '{field}': {message}")]
    Configuration {
        /// The configuration field at fault.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding or decoding failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML decoding failed.
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML encoding failed.
    #[error("TOML encode error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_location(key: &str, path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => format!("'{key}' at {path}"),
        _ => format!("'{key}'"),
    }
}

impl Error {
    /// Build an `InvalidPath` error.
    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build a `NotFound` error.
    pub(crate) fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Build a `Malformed` error.
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    /// Check if error indicates a missing resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use hrcp::Error;
    ///
    /// let err = Error::NotFound { path: "/root/missing".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is a malformed-path error.
    #[must_use]
    pub fn is_path_error(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }

    /// Check if error was raised by schema validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use hrcp::Error;
    ///
    /// let err = Error::Validation {
    ///     key: "port".to_string(),
    ///     path: None,
    ///     message: "must be integer".to_string(),
    /// };
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
