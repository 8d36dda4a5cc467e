//! Attribute schemas and validation.
//!
//! A [`SchemaRegistry`] maps attribute keys to [`PropertySchema`]s. A tree
//! consults its registry on every validated write; keys without a schema
//! accept any value.

mod property;
mod registry;

pub use property::{validate_value, PropertySchema, Validator, ValueType};
pub use registry::SchemaRegistry;
