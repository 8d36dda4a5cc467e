//! Configuration merging and precedence handling.
//!
//! Scalar fields are replaced by higher-precedence sources; the `schema`
//! section accumulates key by key.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use hrcp::config::{Config, ConfigMerger};
///
/// let low = Config { root_name: Some("low".to_string()), ..Default::default() };
/// let high = Config { root_name: Some("high".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.root_name, Some("high".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources ordered from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` into `target`, `source` taking precedence.
    ///
    /// # Merging Rules
    ///
    /// - Scalar fields: source overwrites if `Some`
    /// - Schema: union of keys; a key present in both takes the source's
    ///   schema as a whole
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.root_name.is_some() {
            target.root_name.clone_from(&source.root_name);
        }

        if source.default_mode.is_some() {
            target.default_mode = source.default_mode;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_schema) = source.schema {
            let schema = target.schema.get_or_insert_with(Default::default);
            for (key, property) in source_schema {
                schema.insert(key.clone(), property.clone());
            }
        }
    }
}
