//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use crate::propagation::PropagationMode;
use crate::schema::{PropertySchema, ValueType};
use indexmap::IndexMap;
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = PropagationMode> {
    prop::sample::select(PropagationMode::ALL.to_vec())
}

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop::sample::select(vec![OutputFormat::Human, OutputFormat::Json, OutputFormat::Yaml])
}

fn schema_strategy() -> impl Strategy<Value = IndexMap<String, PropertySchema>> {
    prop::collection::vec(("[a-e]", any::<bool>()), 0..5).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(key, required)| {
                (
                    key,
                    PropertySchema::new()
                        .with_type(ValueType::String)
                        .required(required),
                )
            })
            .collect()
    })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of("[a-z]{1,12}"),
        prop::option::of(mode_strategy()),
        prop::option::of(format_strategy()),
        prop::option::of(schema_strategy()),
    )
        .prop_map(|(root_name, default_mode, output_format, schema)| Config {
            root_name,
            default_mode,
            output_format,
            schema,
        })
}

fn schema_keys(config: &Config) -> Vec<String> {
    let mut keys: Vec<String> = config.registry().keys().map(str::to_string).collect();
    keys.sort();
    keys
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Scalar fields from the higher-precedence source win when set.
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.root_name, high.root_name.or(low.root_name));
        prop_assert_eq!(result.default_mode, high.default_mode.or(low.default_mode));
        prop_assert_eq!(result.output_format, high.output_format.or(low.output_format));
    }

    // Schema keys from both sources survive the merge.
    #[test]
    fn config_merge_schema_is_union(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        let mut expected = schema_keys(&low);
        expected.extend(schema_keys(&high));
        expected.sort();
        expected.dedup();
        prop_assert_eq!(schema_keys(&result), expected);

        for (key, schema) in high.schema.iter().flatten() {
            let merged = result.registry();
            prop_assert_eq!(merged.get(key).map(|s| s.required), Some(schema.required));
        }
    }

    // Merging an empty config changes nothing.
    #[test]
    fn config_merge_default_is_identity(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &Config::default());

        prop_assert_eq!(result.root_name, config.root_name);
        prop_assert_eq!(result.default_mode, config.default_mode);
        prop_assert_eq!(result.output_format, config.output_format);
        prop_assert_eq!(schema_keys(&result), schema_keys(&config));
    }
}
