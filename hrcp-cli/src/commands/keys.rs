//! Command to list attribute keys.

use std::path::PathBuf;

use clap::Args;
use hrcp::display;
use hrcp::output::OutputFormat;
use serde_json::Value;

use crate::error::CliError;
use crate::utils::{load_configuration, load_tree, print_output, GlobalOptions};

/// List every attribute key set anywhere in the tree, sorted.
#[derive(Args)]
pub struct KeysCommand {
    /// Tree file (.json, .yaml, .yml or .toml)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl KeysCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let tree = load_tree(&self.file, &config)?;
        let keys = display::attribute_keys(&tree);

        let output = match global.output_format(&config) {
            OutputFormat::Human => keys.into_iter().collect::<Vec<_>>().join("\n"),
            format => {
                let list = Value::Array(keys.into_iter().map(Value::String).collect());
                format.create_formatter().format_value(&list)?
            }
        };

        print_output(&output);
        Ok(())
    }
}
