//! Utility functions for CLI operations.
//!
//! This module provides the helpers shared by the commands: configuration
//! loading, tree file loading, and output selection.

use std::fs;
use std::path::{Path, PathBuf};

use hrcp::output::{OutputFormat, OutputFormatter};
use hrcp::{Config, ConfigBuilder, PropagationMode, ResourceTree, TreeFormat};
use serde_json::Value;

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Output format requested on the command line.
    pub format: Option<OutputFormat>,

    /// Directory holding the user `config.yaml`.
    pub config_dir: Option<PathBuf>,
}

impl GlobalOptions {
    /// The effective output format: flag, then configuration, then human.
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        self.format
            .or(config.output_format)
            .unwrap_or_default()
    }

    /// A formatter for [`output_format`](Self::output_format).
    pub fn formatter(&self, config: &Config) -> Box<dyn OutputFormatter> {
        self.output_format(config).create_formatter()
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. `hrcp.local.yaml`, then `hrcp.yaml`, discovered from the current directory
/// 3. The user configuration file
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref dir) = global.config_dir {
        builder = builder.with_data_dir(dir);
    }

    builder.build().map_err(|e| match e {
        hrcp::Error::Io(io) => CliError::Io(io),
        other => CliError::Config(other.to_string()),
    })
}

/// Pick the tree format of `path` from its extension.
pub fn tree_format(path: &Path) -> Result<TreeFormat, CliError> {
    TreeFormat::from_path(path).ok_or_else(|| {
        CliError::InvalidArguments(format!(
            "cannot tell the format of {} (expected .json, .yaml, .yml or .toml)",
            path.display()
        ))
    })
}

/// Read and parse a tree file.
///
/// TOML files carry no root name; the configured `root_name` is used, or
/// the file stem when none is configured.
pub fn load_tree(path: &Path, config: &Config) -> Result<ResourceTree, CliError> {
    let format = tree_format(path)?;
    let text = fs::read_to_string(path)?;

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("root");
    let root_name = config.root_name.as_deref().unwrap_or(stem);

    let tree = format.parse(&text, root_name)?;
    log::debug!(
        "Loaded {} resource(s) from {}",
        tree.len(),
        path.display()
    );
    Ok(tree)
}

/// Apply the schema from the configuration to `tree`.
pub fn apply_schema(tree: &mut ResourceTree, config: &Config) {
    for (key, schema) in config.registry().iter() {
        tree.define(key, schema.clone());
    }
}

/// The effective propagation mode: flag, then configuration, then inherit.
pub fn resolve_mode(explicit: Option<PropagationMode>, config: &Config) -> PropagationMode {
    explicit
        .or(config.default_mode)
        .unwrap_or(PropagationMode::Inherit)
}

/// Resolve `key` at `path`, treating an empty aggregation as unset.
pub fn resolve_present(
    tree: &ResourceTree,
    path: &str,
    key: &str,
    mode: PropagationMode,
) -> Result<Option<Value>, CliError> {
    let value = tree.resolve(path, key, mode)?;
    Ok(value.filter(|value| {
        !(mode == PropagationMode::Aggregate && value.as_array().is_some_and(Vec::is_empty))
    }))
}

/// Print formatted output, skipping empty results.
pub fn print_output(text: &str) {
    if !text.is_empty() {
        println!("{text}");
    }
}
