//! Command to resolve one attribute.

use std::path::PathBuf;

use clap::Args;
use hrcp::PropagationMode;

use crate::error::CliError;
use crate::utils::{
    load_configuration, load_tree, print_output, resolve_mode, resolve_present, GlobalOptions,
};

/// Resolve an attribute of a resource.
#[derive(Args)]
pub struct GetCommand {
    /// Tree file (.json, .yaml, .yml or .toml)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Absolute resource path, e.g. /platform/us-east/api
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Attribute key
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Propagation mode (none, inherit, aggregate, merge, require_path, collect_ancestors)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<PropagationMode>,

    /// Show where the value came from
    #[arg(long)]
    pub provenance: bool,
}

impl GetCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let tree = load_tree(&self.file, &config)?;
        let mode = resolve_mode(self.mode, &config);
        let formatter = global.formatter(&config);

        let not_set = || {
            CliError::SemanticFailure(format!(
                "'{}' is not set for {} (mode {mode})",
                self.key, self.path
            ))
        };

        let output = if self.provenance {
            let provenance = tree
                .resolve_with_provenance(&self.path, &self.key, mode)?
                .ok_or_else(not_set)?;
            formatter.format_provenance(&provenance)?
        } else {
            let value =
                resolve_present(&tree, &self.path, &self.key, mode)?.ok_or_else(not_set)?;
            formatter.format_value(&value)?
        };

        print_output(&output);
        Ok(())
    }
}
