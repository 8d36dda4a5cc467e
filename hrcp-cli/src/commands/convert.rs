//! Command to convert a tree between file formats.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, load_tree, tree_format, GlobalOptions};

/// Convert a tree file; formats are chosen by extension.
#[derive(Args)]
pub struct ConvertCommand {
    /// Source tree file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination file (overwritten if present)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

impl ConvertCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let format = tree_format(&self.output)?;
        let tree = load_tree(&self.input, &config)?;

        let mut text = format.render(&tree)?;
        if !text.ends_with('\n') {
            text.push('\n');
        }
        fs::write(&self.output, text)?;

        if !global.quiet {
            eprintln!(
                "Wrote {} resource(s) to {}",
                tree.len(),
                self.output.display()
            );
        }
        Ok(())
    }
}
