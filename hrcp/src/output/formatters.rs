//! Output formatter implementations.

use std::fmt::Write as _;

use serde_json::Value;

use crate::propagation::Provenance;
use crate::Result;

use super::{OutputFormatter, QueryRow};

/// Render a value for a terminal: strings unquoted, everything else as JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Formatter for human-readable output.
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_value(&self, value: &Value) -> Result<String> {
        Ok(plain(value))
    }

    fn format_provenance(&self, provenance: &Provenance) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(out, "value:  {}", plain(&provenance.value));
        let _ = writeln!(out, "source: {}", provenance.source_path);
        let _ = write!(out, "mode:   {}", provenance.mode);

        if let Some(sources) = &provenance.key_sources {
            out.push_str("\nkey sources:");
            for (key, path) in sources {
                let _ = write!(out, "\n  {key} <- {path}");
            }
        }
        if let Some(paths) = &provenance.contributing_paths {
            out.push_str("\ncontributors:");
            for path in paths {
                let _ = write!(out, "\n  {path}");
            }
        }
        Ok(out)
    }

    fn format_rows(&self, rows: &[QueryRow]) -> Result<String> {
        let lines: Vec<String> = rows
            .iter()
            .map(|row| match &row.value {
                Some(value) => format!("{} = {}", row.path, plain(value)),
                None => row.path.clone(),
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_value(&self, value: &Value) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    fn format_provenance(&self, provenance: &Provenance) -> Result<String> {
        Ok(serde_json::to_string_pretty(provenance)?)
    }

    fn format_rows(&self, rows: &[QueryRow]) -> Result<String> {
        Ok(serde_json::to_string_pretty(rows)?)
    }
}

/// Formatter for YAML output.
pub struct YamlFormatter;

impl YamlFormatter {
    fn render<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
        let text = serde_yaml::to_string(value)?;
        Ok(text.trim_end().to_string())
    }
}

impl OutputFormatter for YamlFormatter {
    fn format_value(&self, value: &Value) -> Result<String> {
        Self::render(value)
    }

    fn format_provenance(&self, provenance: &Provenance) -> Result<String> {
        Self::render(provenance)
    }

    fn format_rows(&self, rows: &[QueryRow]) -> Result<String> {
        Self::render(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::propagation::PropagationMode;
    use crate::ResourceTree;
    use serde_json::json;

    fn merged_provenance() -> Provenance {
        let mut tree = ResourceTree::new("org").unwrap();
        tree.set_attribute("/org", "db", json!({"host": "a", "port": 1}))
            .unwrap();
        tree.create("/org/team", None).unwrap();
        tree.set_attribute("/org/team", "db", json!({"host": "b"}))
            .unwrap();
        tree.resolve_with_provenance("/org/team", "db", PropagationMode::Merge)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_human_value() {
        let f = HumanFormatter;
        assert_eq!(f.format_value(&json!("text")).unwrap(), "text");
        assert_eq!(f.format_value(&json!(30)).unwrap(), "30");
        assert_eq!(f.format_value(&json!(["a", 1])).unwrap(), "[\"a\",1]");
    }

    #[test]
    fn test_human_provenance_lists_key_sources() {
        let out = HumanFormatter.format_provenance(&merged_provenance()).unwrap();
        assert!(out.contains("source: /org/team"));
        assert!(out.contains("mode:   merge"));
        assert!(out.contains("host <- /org/team"));
        assert!(out.contains("port <- /org"));
    }

    #[test]
    fn test_human_rows() {
        let rows = vec![
            QueryRow::with_value("/org/a", json!(1)),
            QueryRow::path("/org/b"),
        ];
        assert_eq!(
            HumanFormatter.format_rows(&rows).unwrap(),
            "/org/a = 1\n/org/b"
        );
        assert_eq!(HumanFormatter.format_rows(&[]).unwrap(), "");
    }

    #[test]
    fn test_json_provenance() {
        let out = JsonFormatter.format_provenance(&merged_provenance()).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["mode"], "merge");
        assert_eq!(parsed["value"], json!({"host": "b", "port": 1}));
        assert_eq!(parsed["key_sources"]["port"], "/org");
        assert!(parsed.get("contributing_paths").is_none());
    }

    #[test]
    fn test_json_rows_omit_missing_values() {
        let rows = vec![QueryRow::path("/org/b")];
        let parsed: Value = serde_json::from_str(&JsonFormatter.format_rows(&rows).unwrap()).unwrap();
        assert_eq!(parsed, json!([{"path": "/org/b"}]));
    }

    #[test]
    fn test_yaml_value_and_rows() {
        assert_eq!(YamlFormatter.format_value(&json!(5)).unwrap(), "5");
        let rows = vec![QueryRow::with_value("/org/a", json!("x"))];
        let out = YamlFormatter.format_rows(&rows).unwrap();
        assert!(out.contains("path: /org/a"));
        assert!(out.contains("value: x"));
    }

    #[test]
    fn test_create_formatter() {
        let value = json!({"k": 1});
        let json_out = OutputFormat::Json.create_formatter().format_value(&value).unwrap();
        assert!(json_out.contains("\"k\": 1"));
        let human_out = OutputFormat::Human.create_formatter().format_value(&value).unwrap();
        assert_eq!(human_out, "{\"k\":1}");
    }
}
