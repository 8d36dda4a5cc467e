//! Output formatting for resolution and query results.
//!
//! This module renders resolved values, provenance records and query rows
//! as human-readable text, JSON or YAML.

mod formatters;

use serde::Serialize;
use serde_json::Value;

use crate::propagation::Provenance;
use crate::Result;

pub use crate::config::OutputFormat;
pub use formatters::{HumanFormatter, JsonFormatter, YamlFormatter};

/// One result of a wildcard query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRow {
    /// Path of the matching resource.
    pub path: String,
    /// Resolved value, when the query asked for a key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl QueryRow {
    /// A row with only a path.
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: None,
        }
    }

    /// A row with a path and a resolved value.
    #[must_use]
    pub fn with_value(path: impl Into<String>, value: Value) -> Self {
        Self {
            path: path.into(),
            value: Some(value),
        }
    }
}

/// Trait for formatting results into different output formats.
pub trait OutputFormatter {
    /// Format a single resolved value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_value(&self, value: &Value) -> Result<String>;

    /// Format a provenance record.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_provenance(&self, provenance: &Provenance) -> Result<String>;

    /// Format query rows in order.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_rows(&self, rows: &[QueryRow]) -> Result<String>;
}

impl OutputFormat {
    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Human => Box::new(HumanFormatter),
            Self::Json => Box::new(JsonFormatter),
            Self::Yaml => Box::new(YamlFormatter),
        }
    }
}
