//! Command to query resources by wildcard pattern.

use std::path::PathBuf;

use clap::Args;
use hrcp::output::QueryRow;
use hrcp::PropagationMode;

use crate::error::CliError;
use crate::utils::{
    load_configuration, load_tree, print_output, resolve_mode, resolve_present, GlobalOptions,
};

/// List resources whose path matches a pattern.
///
/// With `--key`, each match is listed with its resolved value; matches
/// where the key resolves to nothing are skipped.
#[derive(Args)]
pub struct QueryCommand {
    /// Tree file (.json, .yaml, .yml or .toml)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Wildcard pattern; `*` matches one segment, `**` any number
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Attribute to resolve for every match
    #[arg(long, value_name = "KEY")]
    pub key: Option<String>,

    /// Propagation mode used with --key
    #[arg(long, value_name = "MODE", requires = "key")]
    pub mode: Option<PropagationMode>,
}

impl QueryCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let tree = load_tree(&self.file, &config)?;
        let matches = tree.query(&self.pattern)?;

        let rows: Vec<QueryRow> = match self.key {
            Some(ref key) => {
                let mode = resolve_mode(self.mode, &config);
                let mut rows = Vec::with_capacity(matches.len());
                for resource in &matches {
                    let path = resource.path();
                    if let Some(value) = resolve_present(&tree, &path, key, mode)? {
                        rows.push(QueryRow::with_value(path, value));
                    }
                }
                rows
            }
            None => matches
                .iter()
                .map(|resource| QueryRow::path(resource.path()))
                .collect(),
        };
        log::debug!("{} of {} match(es) reported", rows.len(), matches.len());

        let output = global.formatter(&config).format_rows(&rows)?;
        print_output(&output);
        Ok(())
    }
}
