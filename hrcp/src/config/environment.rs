//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `HRCP_*` environment variables that
//! override configuration file values.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use crate::propagation::PropagationMode;
use std::env;

/// Overrides the root name.
pub const ROOT_NAME_VAR: &str = "HRCP_ROOT_NAME";
/// Overrides the default propagation mode.
pub const DEFAULT_MODE_VAR: &str = "HRCP_DEFAULT_MODE";
/// Overrides the output format.
pub const OUTPUT_FORMAT_VAR: &str = "HRCP_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use hrcp::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Empty variables are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a mode or format value cannot be
    /// parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(root_name) = Self::read(ROOT_NAME_VAR) {
            config.root_name = Some(root_name);
        }

        if let Some(mode) = Self::read(DEFAULT_MODE_VAR) {
            config.default_mode = Some(Self::parse_mode(&mode)?);
        }

        if let Some(format) = Self::read(OUTPUT_FORMAT_VAR) {
            config.output_format = Some(Self::parse_format(&format)?);
        }

        Ok(())
    }

    fn read(name: &str) -> Option<String> {
        env::var(name).ok().filter(|value| !value.trim().is_empty())
    }

    fn parse_mode(s: &str) -> Result<PropagationMode> {
        s.trim().parse().map_err(|message| Error::Configuration {
            field: DEFAULT_MODE_VAR.into(),
            message,
        })
    }

    fn parse_format(s: &str) -> Result<OutputFormat> {
        s.trim().parse().map_err(|message| Error::Configuration {
            field: OUTPUT_FORMAT_VAR.into(),
            message,
        })
    }
}
