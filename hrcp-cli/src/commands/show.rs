//! Command to print a tree.

use std::path::PathBuf;

use clap::Args;
use hrcp::output::OutputFormat;
use hrcp::{display, operations};

use crate::error::CliError;
use crate::utils::{load_configuration, load_tree, print_output, GlobalOptions};

/// Print the tree, or the subtree at `--path`.
///
/// Human output draws the hierarchy; JSON and YAML emit the serialized
/// tree.
#[derive(Args)]
pub struct ShowCommand {
    /// Tree file (.json, .yaml, .yml or .toml)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print only the subtree rooted here
    #[arg(long, value_name = "PATH")]
    pub path: Option<String>,

    /// Names only, without attributes
    #[arg(long)]
    pub compact: bool,
}

impl ShowCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut tree = load_tree(&self.file, &config)?;

        if let Some(ref path) = self.path {
            tree = operations::clone_subtree(&tree, path)?;
        }

        let output = match global.output_format(&config) {
            OutputFormat::Human => display::pretty(&tree, None, self.compact),
            OutputFormat::Json => tree.to_json_string()?,
            OutputFormat::Yaml => tree.to_yaml_string()?.trim_end().to_string(),
        };

        print_output(&output);
        Ok(())
    }
}
