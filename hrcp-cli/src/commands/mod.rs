//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `get`: Resolve one attribute of one resource
//! - `query`: List resources matching a wildcard pattern
//! - `show`: Print the tree
//! - `keys`: List attribute keys in use
//! - `validate`: Check a tree against the configured schema
//! - `convert`: Convert a tree between file formats
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod convert;
pub mod get;
pub mod keys;
pub mod query;
pub mod show;
pub mod validate;

pub use completions::CompletionsCommand;
pub use convert::ConvertCommand;
pub use get::GetCommand;
pub use keys::KeysCommand;
pub use query::QueryCommand;
pub use show::ShowCommand;
pub use validate::ValidateCommand;
