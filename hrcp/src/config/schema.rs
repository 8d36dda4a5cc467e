//! Configuration schema definitions.
//!
//! This module defines the configuration file structure for hrcp: the
//! default tree root name, the default propagation mode, the output format
//! and attribute schemas applied when validating trees.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::propagation::PropagationMode;
use crate::schema::{PropertySchema, SchemaRegistry};

/// Complete configuration structure.
///
/// Every field is optional so that partial files can be layered.
///
/// # Examples
///
/// ```
/// use hrcp::config::{Config, OutputFormat};
///
/// let config: Config = serde_yaml::from_str(
///     "root_name: platform\noutput_format: json\nschema:\n  port:\n    type: integer\n",
/// ).unwrap();
/// assert_eq!(config.root_name.as_deref(), Some("platform"));
/// assert_eq!(config.output_format, Some(OutputFormat::Json));
/// assert!(config.registry().contains("port"));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root name used when a tree format does not carry one (TOML).
    pub root_name: Option<String>,

    /// Propagation mode used when a command does not name one.
    pub default_mode: Option<PropagationMode>,

    /// Output format for command results.
    pub output_format: Option<OutputFormat>,

    /// Attribute schemas keyed by attribute name.
    pub schema: Option<IndexMap<String, PropertySchema>>,
}

impl Config {
    /// Build a schema registry from the `schema` section.
    #[must_use]
    pub fn registry(&self) -> SchemaRegistry {
        self.schema
            .iter()
            .flatten()
            .map(|(key, schema)| (key.clone(), schema.clone()))
            .collect()
    }
}

/// Output format for command results.
///
/// # Examples
///
/// ```
/// use hrcp::config::OutputFormat;
///
/// let format: OutputFormat = "yaml".parse().unwrap();
/// assert_eq!(format, OutputFormat::Yaml);
/// assert_eq!(format.to_string(), "yaml");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text for terminals.
    #[default]
    Human,
    /// JSON output format.
    Json,
    /// YAML output format.
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(format!(
                "unknown output format '{s}' (expected human, json or yaml)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValueType;

    #[test]
    fn test_empty_config() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert!(config.root_name.is_none());
        assert!(config.default_mode.is_none());
        assert!(config.registry().is_empty());
    }

    #[test]
    fn test_full_config() {
        let yaml = r"
root_name: platform
default_mode: inherit
output_format: yaml
schema:
  port:
    type: integer
    minimum: 1
    maximum: 65535
    default: 8080
  env:
    choices: [dev, prod]
    required: true
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.default_mode, Some(PropagationMode::Inherit));
        assert_eq!(config.output_format, Some(OutputFormat::Yaml));

        let registry = config.registry();
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["port", "env"]);
        assert_eq!(
            registry.get("port").unwrap().value_type,
            Some(ValueType::Integer)
        );
        assert_eq!(registry.required_fields(), vec!["env"]);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(serde_yaml::from_str::<Config>("root: x\n").is_err());
        assert!(serde_yaml::from_str::<Config>("schema:\n  port:\n    kind: integer\n").is_err());
    }

    #[test]
    fn test_mode_names_in_yaml() {
        let config: Config = serde_yaml::from_str("default_mode: require_path\n").unwrap();
        assert_eq!(config.default_mode, Some(PropagationMode::RequirePath));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("csv".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Human);
    }
}
