//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hrcp::output::OutputFormat;

use crate::commands::{
    CompletionsCommand, ConvertCommand, GetCommand, KeysCommand, QueryCommand, ShowCommand,
    ValidateCommand,
};

/// Command-line tool for inspecting hierarchical configuration trees.
#[derive(Parser)]
#[command(name = "hrcp")]
#[command(
    version,
    about = "Inspect hierarchical resource configuration trees",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Output format (human, json, yaml)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<OutputFormat>,

    /// Directory holding the user config.yaml
    #[arg(long, value_name = "PATH", global = true, env = "HRCP_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve one attribute of one resource
    Get(GetCommand),

    /// List resources matching a wildcard pattern
    Query(QueryCommand),

    /// Print the tree
    Show(ShowCommand),

    /// List every attribute key used in the tree
    Keys(KeysCommand),

    /// Check a tree against the configured schema
    Validate(ValidateCommand),

    /// Convert a tree between JSON, YAML and TOML
    Convert(ConvertCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
