//! Key-to-schema registry.

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use super::property::{validate_value, PropertySchema};
use crate::error::Result;

const JSON_SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Schemas for attribute keys.
///
/// Keys without a registered schema accept any value.
///
/// # Examples
///
/// ```
/// use hrcp::schema::{PropertySchema, SchemaRegistry, ValueType};
/// use serde_json::json;
///
/// let mut registry = SchemaRegistry::new();
/// registry.define("port", PropertySchema::new().with_type(ValueType::Integer).with_range(1, 65535));
///
/// assert!(registry.validate("port", &json!(8080), None).is_ok());
/// assert!(registry.validate("port", &json!(0), None).is_err());
/// assert!(registry.validate("anything", &json!("goes"), None).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, PropertySchema>,
}

impl SchemaRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the schema for `key`, returning the old one.
    pub fn define(&mut self, key: impl Into<String>, schema: PropertySchema) -> Option<PropertySchema> {
        self.schemas.insert(key.into(), schema)
    }

    /// Schema registered for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertySchema> {
        self.schemas.get(key)
    }

    /// Validate `value` against the schema for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) if the value
    /// violates the schema.
    pub fn validate(&self, key: &str, value: &Value, path: Option<&str>) -> Result<()> {
        match self.get(key) {
            Some(schema) => validate_value(value, schema, key, path),
            None => Ok(()),
        }
    }

    /// Registered `(key, schema)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertySchema)> {
        self.schemas.iter().map(|(key, schema)| (key.as_str(), schema))
    }

    /// Registered keys in definition order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether no key is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Whether `key` has a schema.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.schemas.contains_key(key)
    }

    /// Default value declared for `key`.
    #[must_use]
    pub fn get_default(&self, key: &str) -> Option<&Value> {
        self.get(key).and_then(|schema| schema.default.as_ref())
    }

    /// Keys marked as required.
    #[must_use]
    pub fn required_fields(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, schema)| schema.required)
            .map(|(key, _)| key)
            .collect()
    }

    /// Export as a JSON Schema (draft 2020-12) object schema.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .iter()
            .map(|(key, schema)| (key.to_string(), property_json_schema(schema)))
            .collect();

        let mut document = json!({
            "$schema": JSON_SCHEMA_DIALECT,
            "type": "object",
            "properties": properties,
        });
        let required = self.required_fields();
        if !required.is_empty() {
            document["required"] = json!(required);
        }
        document
    }

    /// Markdown documentation, one section per key in sorted order.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("# Schema Documentation\n\n");
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(key, _)| *key);

        for (key, schema) in entries {
            let _ = writeln!(out, "## {key}\n");
            if let Some(description) = &schema.description {
                let _ = writeln!(out, "{description}\n");
            }
            if let Some(value_type) = schema.value_type {
                let _ = writeln!(out, "- **Type**: {value_type}");
            }
            if let Some(minimum) = &schema.minimum {
                let _ = writeln!(out, "- **Minimum**: {minimum}");
            }
            if let Some(maximum) = &schema.maximum {
                let _ = writeln!(out, "- **Maximum**: {maximum}");
            }
            if let Some(choices) = &schema.choices {
                let rendered: Vec<String> = choices.iter().map(Value::to_string).collect();
                let _ = writeln!(out, "- **Choices**: {}", rendered.join(", "));
            }
            if let Some(default) = &schema.default {
                let _ = writeln!(out, "- **Default**: {default}");
            }
            if schema.required {
                let _ = writeln!(out, "- **Required**: yes");
            }
            out.push('\n');
        }
        out
    }
}

fn property_json_schema(schema: &PropertySchema) -> Value {
    let mut property = Map::new();
    if let Some(value_type) = schema.value_type {
        property.insert("type".into(), json!(value_type.as_str()));
    }
    if let Some(minimum) = &schema.minimum {
        property.insert("minimum".into(), Value::Number(minimum.clone()));
    }
    if let Some(maximum) = &schema.maximum {
        property.insert("maximum".into(), Value::Number(maximum.clone()));
    }
    if let Some(choices) = &schema.choices {
        property.insert("enum".into(), Value::Array(choices.clone()));
    }
    if let Some(default) = &schema.default {
        property.insert("default".into(), default.clone());
    }
    if let Some(description) = &schema.description {
        property.insert("description".into(), json!(description));
    }
    Value::Object(property)
}

impl FromIterator<(String, PropertySchema)> for SchemaRegistry {
    fn from_iter<I: IntoIterator<Item = (String, PropertySchema)>>(iter: I) -> Self {
        Self {
            schemas: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, PropertySchema)> for SchemaRegistry {
    fn extend<I: IntoIterator<Item = (String, PropertySchema)>>(&mut self, iter: I) {
        self.schemas.extend(iter);
    }
}
