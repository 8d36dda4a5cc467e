//! Configuration validation.
//!
//! Checks that a merged configuration can be used: the root name must be a
//! valid resource name and every attribute schema must be satisfiable.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::path::validate_name;
use crate::schema::{validate_value, PropertySchema};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use hrcp::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref root_name) = config.root_name {
            validate_name(root_name).map_err(|e| Error::Configuration {
                field: "root_name".into(),
                message: e.to_string(),
            })?;
        }

        if let Some(ref schema) = config.schema {
            for (key, property) in schema {
                Self::validate_property(key, property)?;
            }
        }

        Ok(())
    }

    /// Validate one attribute schema for internal consistency.
    ///
    /// The bounds must be ordered, choices must not be empty, and the
    /// default (if any) must satisfy the schema it belongs to.
    fn validate_property(key: &str, property: &PropertySchema) -> Result<()> {
        let field = format!("schema.{key}");

        if key.is_empty() {
            return Err(Error::Configuration {
                field,
                message: "attribute key cannot be empty".into(),
            });
        }

        if let (Some(minimum), Some(maximum)) = (&property.minimum, &property.maximum) {
            let (low, high) = (minimum.as_f64(), maximum.as_f64());
            if let (Some(low), Some(high)) = (low, high) {
                if low > high {
                    return Err(Error::Configuration {
                        field,
                        message: format!("minimum ({minimum}) is greater than maximum ({maximum})"),
                    });
                }
            }
        }

        if property.choices.as_ref().is_some_and(Vec::is_empty) {
            return Err(Error::Configuration {
                field,
                message: "choices cannot be empty".into(),
            });
        }

        if let Some(ref default) = property.default {
            validate_value(default, property, key, None).map_err(|e| Error::Configuration {
                field: field.clone(),
                message: format!("default does not satisfy the schema: {e}"),
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValueType;
    use indexmap::IndexMap;
    use serde_json::json;

    fn with_property(key: &str, property: PropertySchema) -> Config {
        let mut schema = IndexMap::new();
        schema.insert(key.to_string(), property);
        Config {
            schema: Some(schema),
            ..Default::default()
        }
    }

    fn field_of(result: Result<()>) -> String {
        match result {
            Err(Error::Configuration { field, .. }) => field,
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = with_property(
            "port",
            PropertySchema::new()
                .with_type(ValueType::Integer)
                .with_range(1, 65535)
                .with_default(json!(8080)),
        );
        ConfigValidator::validate(&config).unwrap();
    }

    #[test]
    fn test_invalid_root_name() {
        let config = Config {
            root_name: Some("a/b".to_string()),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "root_name");

        let config = Config {
            root_name: Some(String::new()),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_inverted_range() {
        let config = with_property("n", PropertySchema::new().with_range(10, 1));
        assert_eq!(field_of(ConfigValidator::validate(&config)), "schema.n");
    }

    #[test]
    fn test_equal_bounds_allowed() {
        let config = with_property("n", PropertySchema::new().with_range(5, 5));
        ConfigValidator::validate(&config).unwrap();
    }

    #[test]
    fn test_empty_choices() {
        let config = with_property("env", PropertySchema::new().with_choices([]));
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_default_must_satisfy_schema() {
        let config = with_property(
            "port",
            PropertySchema::new()
                .with_type(ValueType::Integer)
                .with_default(json!("8080")),
        );
        assert_eq!(field_of(ConfigValidator::validate(&config)), "schema.port");

        let config = with_property(
            "env",
            PropertySchema::new()
                .with_choices([json!("dev")])
                .with_default(json!("prod")),
        );
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
