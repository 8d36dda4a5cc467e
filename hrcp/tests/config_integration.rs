//! Integration tests for the configuration system.
//!
//! Tests that modify environment variables are marked with `#[serial]` to
//! ensure they run sequentially; environment variables are process-global.

mod common;

use common::platform_tree;
use hrcp::config::{ConfigBuilder, OutputFormat};
use hrcp::error::Error;
use hrcp::PropagationMode;
use serde_json::json;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

struct Workspace {
    project: TempDir,
    data_dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            project: TempDir::new().unwrap(),
            data_dir: TempDir::new().unwrap(),
        }
    }

    fn write_user(&self, contents: &str) {
        fs::write(self.data_dir.path().join("config.yaml"), contents).unwrap();
    }

    fn write_project(&self, name: &str, contents: &str) {
        fs::write(self.project.path().join(name), contents).unwrap();
    }

    fn builder(&self) -> ConfigBuilder {
        ConfigBuilder::new()
            .with_working_dir(self.project.path())
            .with_data_dir(self.data_dir.path())
    }
}

#[test]
fn test_full_precedence_chain() {
    let ws = Workspace::new();
    ws.write_user("root_name: user\noutput_format: yaml\ndefault_mode: inherit\n");
    ws.write_project("hrcp.yaml", "root_name: project\ndefault_mode: merge\n");
    ws.write_project("hrcp.local.yaml", "root_name: local\n");

    let config = ws.builder().skip_env().build().unwrap();
    assert_eq!(config.root_name.as_deref(), Some("local"));
    assert_eq!(config.default_mode, Some(PropagationMode::Merge));
    assert_eq!(config.output_format, Some(OutputFormat::Yaml));
}

#[test]
fn test_discovery_from_nested_directory() {
    let ws = Workspace::new();
    ws.write_project("hrcp.yaml", "root_name: found\n");
    let nested = ws.project.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    let config = ConfigBuilder::new()
        .with_working_dir(&nested)
        .with_data_dir(ws.data_dir.path())
        .skip_env()
        .build()
        .unwrap();
    assert_eq!(config.root_name.as_deref(), Some("found"));
}

#[test]
fn test_schema_from_config_validates_tree() {
    let ws = Workspace::new();
    ws.write_project(
        "hrcp.yaml",
        "schema:\n  timeout:\n    type: integer\n    minimum: 1\n    maximum: 45\n",
    );
    let config = ws.builder().skip_env().build().unwrap();

    let mut tree = platform_tree();
    for (key, schema) in config.registry().iter() {
        tree.define(key, schema.clone());
    }

    let problems = tree.validate_all(None).unwrap();
    assert_eq!(problems.len(), 1);
    assert!(problems["/platform/us-east/api"][0].contains("<= 45"));
    assert!(!tree.is_valid());

    let err = tree
        .set_attribute("/platform", "timeout", json!(0))
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_invalid_yaml_reports_file() {
    let ws = Workspace::new();
    ws.write_project("hrcp.yaml", "root_name: [unterminated\n");

    match ws.builder().skip_env().build() {
        Err(Error::Configuration { field, .. }) => assert!(field.ends_with("hrcp.yaml")),
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_unknown_key_rejected() {
    let ws = Workspace::new();
    ws.write_user("colour: blue\n");
    assert!(ws.builder().skip_env().build().is_err());
}

#[test]
#[serial]
fn test_environment_beats_files() {
    let ws = Workspace::new();
    ws.write_project("hrcp.yaml", "default_mode: inherit\nroot_name: file\n");

    env::set_var("HRCP_DEFAULT_MODE", "collect_ancestors");
    env::set_var("HRCP_ROOT_NAME", "env");
    let result = ws.builder().build();
    env::remove_var("HRCP_DEFAULT_MODE");
    env::remove_var("HRCP_ROOT_NAME");

    let config = result.unwrap();
    assert_eq!(config.default_mode, Some(PropagationMode::CollectAncestors));
    assert_eq!(config.root_name.as_deref(), Some("env"));
}

#[test]
#[serial]
fn test_environment_root_name_is_validated() {
    let ws = Workspace::new();
    env::set_var("HRCP_ROOT_NAME", "bad/name");
    let result = ws.builder().build();
    env::remove_var("HRCP_ROOT_NAME");

    assert!(matches!(result, Err(Error::Configuration { field, .. }) if field == "root_name"));
}
