//! Tree serialization.
//!
//! Trees are exchanged as nested [`ResourceRecord`]s:
//!
//! ```json
//! {
//!   "name": "platform",
//!   "attributes": {"timeout": 30},
//!   "children": {
//!     "us-east": {"name": "us-east", "attributes": {}, "children": {}}
//!   }
//! }
//! ```
//!
//! JSON and YAML carry records directly. TOML has no room for the record
//! envelope, so root attributes become top-level keys and every child
//! becomes a table named after it; mapping-valued and null attributes
//! cannot be expressed that way and are rejected on export.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{Error, Result};
use crate::path::validate_name;
use crate::resource::Attributes;
use crate::tree::{ResourceRef, ResourceTree};

/// Serialized form of a resource and its subtree.
///
/// The `name` field is authoritative; the keys of `children` are only
/// labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Resource name.
    pub name: String,
    /// Local attributes.
    #[serde(default)]
    pub attributes: Attributes,
    /// Child records keyed by name.
    #[serde(default)]
    pub children: IndexMap<String, ResourceRecord>,
}

impl ResourceRecord {
    /// A record with no attributes and no children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            children: IndexMap::new(),
        }
    }

    /// Snapshot a resource and its subtree.
    #[must_use]
    pub fn from_resource(resource: ResourceRef<'_>) -> Self {
        Self {
            name: resource.name().to_string(),
            attributes: resource.attributes().clone(),
            children: resource
                .children()
                .map(|child| (child.name().to_string(), Self::from_resource(child)))
                .collect(),
        }
    }

    /// Check every name in the record and reject sibling collisions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] or [`Error::DuplicateName`].
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        let mut seen = HashSet::new();
        for child in self.children.values() {
            if !seen.insert(child.name.as_str()) {
                return Err(Error::DuplicateName {
                    parent: self.name.clone(),
                    name: child.name.clone(),
                });
            }
            child.validate()?;
        }
        Ok(())
    }

    /// Number of resources in the record, itself included.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.children.values().map(Self::len).sum::<usize>()
    }

    /// Always `false`: a record describes at least one resource.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Snapshot a resource and its subtree.
#[must_use]
pub fn resource_to_record(resource: ResourceRef<'_>) -> ResourceRecord {
    ResourceRecord::from_resource(resource)
}

/// Snapshot a whole tree.
#[must_use]
pub fn tree_to_record(tree: &ResourceTree) -> ResourceRecord {
    ResourceRecord::from_resource(tree.root())
}

/// Build a tree from a record.
///
/// Attribute values are loaded as-is, without schema validation.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] or [`Error::DuplicateName`] if the record
/// contains bad names.
pub fn tree_from_record(record: &ResourceRecord) -> Result<ResourceTree> {
    record.validate()?;
    let mut tree = ResourceTree::new(record.name.as_str())?;
    let root = tree.root_id();
    if let Some(resource) = tree.get_mut("/") {
        for (key, value) in &record.attributes {
            resource.set_attribute(key.as_str(), value.clone());
        }
    }
    for child in record.children.values() {
        tree.attach(root, child)?;
    }
    log::debug!("Loaded tree '{}' with {} resource(s)", record.name, tree.len());
    Ok(tree)
}

/// Build a tree from an untyped JSON value.
///
/// # Errors
///
/// Returns [`Error::Json`] if the value does not have the record shape, or
/// a naming error from [`tree_from_record`].
pub fn tree_from_value(value: Value) -> Result<ResourceTree> {
    let record: ResourceRecord = serde_json::from_value(value)?;
    tree_from_record(&record)
}

/// File formats a tree can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    /// JSON records.
    Json,
    /// YAML records.
    Yaml,
    /// TOML tables.
    Toml,
}

impl TreeFormat {
    /// Pick a format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parse a tree. `root_name` is only used by TOML.
    ///
    /// # Errors
    ///
    /// Returns the format's parse error or a naming error.
    pub fn parse(self, text: &str, root_name: &str) -> Result<ResourceTree> {
        match self {
            Self::Json => ResourceTree::from_json_str(text),
            Self::Yaml => ResourceTree::from_yaml_str(text),
            Self::Toml => ResourceTree::from_toml_str(text, root_name),
        }
    }

    /// Render a tree.
    ///
    /// # Errors
    ///
    /// Returns the format's encoding error, or [`Error::Malformed`] for
    /// values TOML cannot represent.
    pub fn render(self, tree: &ResourceTree) -> Result<String> {
        match self {
            Self::Json => tree.to_json_string(),
            Self::Yaml => tree.to_yaml_string(),
            Self::Toml => tree.to_toml_string(),
        }
    }
}

impl ResourceTree {
    /// Snapshot the whole tree.
    #[must_use]
    pub fn to_record(&self) -> ResourceRecord {
        tree_to_record(self)
    }

    /// Build a tree from a record. See [`tree_from_record`].
    ///
    /// # Errors
    ///
    /// Returns a naming error if the record contains bad names.
    pub fn from_record(record: &ResourceRecord) -> Result<Self> {
        tree_from_record(record)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if encoding fails.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_record())?)
    }

    /// Parse a JSON record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed input or a naming error.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let record: ResourceRecord = serde_json::from_str(text)?;
        tree_from_record(&record)
    }

    /// Write pretty-printed JSON to a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] or [`Error::Json`].
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut text = self.to_json_string()?;
        text.push('\n');
        fs::write(path, text)?;
        Ok(())
    }

    /// Read a JSON record from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`], [`Error::Json`] or a naming error.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] if encoding fails.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.to_record())?)
    }

    /// Parse a YAML record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] for malformed input or a naming error.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let record: ResourceRecord = serde_yaml::from_str(text)?;
        tree_from_record(&record)
    }

    /// TOML: root attributes as top-level keys, children as tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] for null or mapping-valued attributes,
    /// or for an attribute that shares its key with a child.
    pub fn to_toml_string(&self) -> Result<String> {
        let table = resource_to_toml(self.root())?;
        Ok(toml::to_string(&table)?)
    }

    /// Parse TOML, turning every table into a child resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TomlDe`] for malformed input or a naming error.
    pub fn from_toml_str(text: &str, root_name: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(text)?;
        let record = toml_to_record(root_name, table)?;
        tree_from_record(&record)
    }
}

fn resource_to_toml(resource: ResourceRef<'_>) -> Result<toml::Table> {
    let path = resource.path();
    let mut table = toml::Table::new();
    for (key, value) in resource.attributes() {
        if value.is_object() {
            return Err(Error::malformed(format!(
                "attribute '{key}' at {path} is a mapping, which TOML would read back as a child"
            )));
        }
        if resource.child(key).is_some() {
            return Err(Error::malformed(format!(
                "attribute '{key}' at {path} collides with a child of the same name"
            )));
        }
        table.insert(key.clone(), json_to_toml(value, key, &path)?);
    }
    for child in resource.children() {
        table.insert(
            child.name().to_string(),
            toml::Value::Table(resource_to_toml(child)?),
        );
    }
    Ok(table)
}

fn json_to_toml(value: &Value, key: &str, path: &str) -> Result<toml::Value> {
    Ok(match value {
        Value::Null => {
            return Err(Error::malformed(format!(
                "attribute '{key}' at {path} contains null, which TOML cannot represent"
            )))
        }
        Value::Bool(b) => toml::Value::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => toml::Value::Integer(i),
            None => match n.as_f64() {
                Some(f) if n.is_f64() => toml::Value::Float(f),
                _ => {
                    return Err(Error::malformed(format!(
                        "attribute '{key}' at {path} holds {n}, outside TOML's integer range"
                    )))
                }
            },
        },
        Value::String(s) => toml::Value::String(s.clone()),
        Value::Array(items) => toml::Value::Array(
            items
                .iter()
                .map(|item| json_to_toml(item, key, path))
                .collect::<Result<_>>()?,
        ),
        Value::Object(map) => toml::Value::Table(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), json_to_toml(v, key, path)?)))
                .collect::<Result<_>>()?,
        ),
    })
}

fn toml_to_record(name: &str, table: toml::Table) -> Result<ResourceRecord> {
    let mut record = ResourceRecord::new(name);
    for (key, value) in table {
        match value {
            toml::Value::Table(child) => {
                let child = toml_to_record(&key, child)?;
                record.children.insert(key, child);
            }
            other => {
                record.attributes.insert(key, toml_to_json(other)?);
            }
        }
    }
    Ok(record)
}

fn toml_to_json(value: toml::Value) -> Result<Value> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| Error::malformed(format!("TOML float {f} has no JSON equivalent")))?,
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(toml_to_json)
                .collect::<Result<_>>()?,
        ),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| Ok((k, toml_to_json(v)?)))
                .collect::<Result<_>>()?,
        ),
    })
}
