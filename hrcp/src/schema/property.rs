//! Per-attribute constraints.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{Error, Result};

/// Custom predicate applied after the declarative checks.
pub type Validator = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// JSON value kinds an attribute can be constrained to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A number without a fractional part.
    Integer,
    /// Any number, integers included.
    Number,
    /// A string.
    String,
    /// An ordered sequence.
    Array,
    /// A string-keyed mapping.
    Object,
}

impl ValueType {
    /// JSON Schema type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// The most specific type of a value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Whether `value` is of this type.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            other => Self::of(value) == other,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation rules for one attribute key.
///
/// # Examples
///
/// ```
/// use hrcp::schema::{PropertySchema, ValueType};
///
/// let port = PropertySchema::new()
///     .with_type(ValueType::Integer)
///     .with_range(1, 65535)
///     .with_description("Listen port");
/// assert_eq!(port.value_type, Some(ValueType::Integer));
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertySchema {
    /// Required value type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,

    /// Allowed values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Value>>,

    /// Inclusive lower bound for numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,

    /// Inclusive upper bound for numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,

    /// Custom predicate; not serialized.
    #[serde(skip)]
    pub validator: Option<Validator>,

    /// Value reported when the attribute is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Human-readable documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether every resource must set the attribute.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

impl PropertySchema {
    /// An unconstrained schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain the value type.
    #[must_use]
    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Restrict values to a fixed set.
    #[must_use]
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = Value>) -> Self {
        self.choices = Some(choices.into_iter().collect());
        self
    }

    /// Set the inclusive lower bound.
    #[must_use]
    pub fn with_minimum(mut self, minimum: impl Into<Number>) -> Self {
        self.minimum = Some(minimum.into());
        self
    }

    /// Set the inclusive upper bound.
    #[must_use]
    pub fn with_maximum(mut self, maximum: impl Into<Number>) -> Self {
        self.maximum = Some(maximum.into());
        self
    }

    /// Set both bounds.
    #[must_use]
    pub fn with_range(self, minimum: impl Into<Number>, maximum: impl Into<Number>) -> Self {
        self.with_minimum(minimum).with_maximum(maximum)
    }

    /// Add a custom predicate.
    #[must_use]
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the attribute as required (or not).
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

impl fmt::Debug for PropertySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySchema")
            .field("value_type", &self.value_type)
            .field("choices", &self.choices)
            .field("minimum", &self.minimum)
            .field("maximum", &self.maximum)
            .field("validator", &self.validator.as_ref().map(|_| "<fn>"))
            .field("default", &self.default)
            .field("description", &self.description)
            .field("required", &self.required)
            .finish()
    }
}

fn as_f64(number: &Number) -> f64 {
    number.as_f64().unwrap_or(f64::NAN)
}

/// Check `value` against `schema`.
///
/// Checks run in order: type, choices, minimum, maximum, custom validator.
/// The bounds only apply to numbers.
///
/// # Errors
///
/// Returns [`Error::Validation`] describing the first failed check.
pub fn validate_value(value: &Value, schema: &PropertySchema, key: &str, path: Option<&str>) -> Result<()> {
    let fail = |message: String| Error::Validation {
        key: key.to_string(),
        path: path.map(str::to_string),
        message,
    };

    if let Some(expected) = schema.value_type {
        if !expected.matches(value) {
            return Err(fail(format!(
                "must be {expected}, got {}: {value}",
                ValueType::of(value)
            )));
        }
    }

    if let Some(choices) = &schema.choices {
        if !choices.contains(value) {
            let allowed: Vec<String> = choices.iter().map(Value::to_string).collect();
            return Err(fail(format!(
                "must be one of [{}], got {value}",
                allowed.join(", ")
            )));
        }
    }

    if let Some(number) = value.as_f64() {
        if let Some(minimum) = &schema.minimum {
            if number < as_f64(minimum) {
                return Err(fail(format!("must be >= {minimum}, got {value}")));
            }
        }
        if let Some(maximum) = &schema.maximum {
            if number > as_f64(maximum) {
                return Err(fail(format!("must be <= {maximum}, got {value}")));
            }
        }
    }

    if let Some(validator) = &schema.validator {
        if !validator(value) {
            return Err(fail(format!("failed custom validation: {value}")));
        }
    }

    Ok(())
}
