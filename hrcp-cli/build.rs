//! Build script for hrcp-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("hrcp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect hierarchical resource configuration trees")
        .long_about(
            "Resolve, query and validate attributes in trees of named resources, \
             with values propagated along the hierarchy",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format (human, json, yaml)")
                .value_name("FORMAT")
                .global(true),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Directory holding the user config.yaml")
                .value_name("PATH")
                .global(true)
                .env("HRCP_CONFIG_DIR"),
        )
        .subcommands(vec![
            Command::new("get")
                .about("Resolve one attribute of one resource")
                .long_about("Resolve an attribute using a propagation mode, optionally with provenance"),
            Command::new("query")
                .about("List resources matching a wildcard pattern")
                .long_about("Match resource paths against a pattern and optionally resolve a key for each"),
            Command::new("show")
                .about("Print the tree")
                .long_about("Draw the tree or a subtree, or emit it as JSON or YAML"),
            Command::new("keys")
                .about("List every attribute key used in the tree"),
            Command::new("validate")
                .about("Check a tree against the configured schema")
                .long_about("Validate every resource against the schema from the layered configuration"),
            Command::new("convert")
                .about("Convert a tree between JSON, YAML and TOML"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("hrcp.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
