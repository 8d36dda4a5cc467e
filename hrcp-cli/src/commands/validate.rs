//! Command to validate a tree against the configured schema.

use std::path::PathBuf;

use clap::Args;
use hrcp::output::OutputFormat;

use crate::error::CliError;
use crate::utils::{apply_schema, load_configuration, load_tree, print_output, GlobalOptions};

/// Validate a tree file.
///
/// The schema comes from the `schema` section of the layered
/// configuration. Exits with status 1 when any resource is invalid.
#[derive(Args)]
pub struct ValidateCommand {
    /// Tree file (.json, .yaml, .yml or .toml)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut tree = load_tree(&self.file, &config)?;
        apply_schema(&mut tree, &config);
        log::debug!("Validating against {} schema key(s)", tree.schema().len());

        let problems = tree.validate_all(None)?;
        let format = global.output_format(&config);

        match format {
            OutputFormat::Human => {
                if problems.is_empty() {
                    if !global.quiet {
                        println!("{} is valid", self.file.display());
                    }
                } else {
                    eprint!("{}", tree.validation_summary());
                }
            }
            format => {
                let rendered = serde_json::to_value(&problems).map_err(hrcp::Error::from)?;
                print_output(&format.create_formatter().format_value(&rendered)?);
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CliError::SemanticFailure(format!(
                "{} invalid resource(s)",
                problems.len()
            )))
        }
    }
}
