//! Main entry point for the hrcp CLI.
//!
//! This is the command-line interface over hrcp resource trees. It provides
//! commands for inspecting tree files:
//! - `get`: Resolve an attribute with a propagation mode
//! - `query`: Match resources with a wildcard pattern
//! - `show`: Print the tree
//! - `validate`: Check a tree against the configured schema
//! - `convert`: Translate between JSON, YAML and TOML

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _level = hrcp::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        quiet: cli.quiet,
        format: cli.format,
        config_dir: cli.config_dir,
    };

    let result = match cli.command {
        cli::Command::Get(cmd) => cmd.execute(&global),
        cli::Command::Query(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::Keys(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Convert(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
