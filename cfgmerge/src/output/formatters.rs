//! Output formatter implementations.

use crate::model::{Category, ConfigurationNode, ConfigurationProperty, PropertyType};
use crate::{Error, Result};

use super::{ModelSummary, OutputFormatter};

/// Formatter for YAML output.
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format_tree(&self, node: &ConfigurationNode) -> Result<String> {
        Ok(serde_yaml::to_string(node)?)
    }

    fn format_summary(&self, summary: &ModelSummary) -> Result<String> {
        Ok(serde_yaml::to_string(summary)?)
    }
}

/// Formatter for JSON output.
pub struct JsonFormatter;

impl JsonFormatter {
    fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
        serde_json::to_string_pretty(value).map_err(|e| Error::Validation {
            field: "json_output".to_string(),
            message: format!("failed to serialize to JSON: {e}"),
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_tree(&self, node: &ConfigurationNode) -> Result<String> {
        Self::to_json(node)
    }

    fn format_summary(&self, summary: &ModelSummary) -> Result<String> {
        Self::to_json(summary)
    }
}

/// Formatter for an indented, human-readable tree.
///
/// ```text
/// /
///   - jcr:primaryType = rep:root
///   /a
///     - p = [x, y]
/// ```
pub struct TextFormatter;

impl TextFormatter {
    fn write_node(out: &mut String, node: &ConfigurationNode, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&format!("{indent}{}", node.path()));
        if node.category() != Category::Config {
            out.push_str(&format!(" ({})", node.category()));
        }
        out.push('\n');

        for property in node.properties().values() {
            out.push_str(&format!(
                "{indent}  - {} = {}\n",
                property.name(),
                Self::describe(property)
            ));
        }
        for child in node.children() {
            Self::write_node(out, child, depth + 1);
        }
    }

    fn describe(property: &ConfigurationProperty) -> String {
        let values: Vec<String> = property.values().iter().map(ToString::to_string).collect();
        match property.property_type() {
            PropertyType::Single => values.join(""),
            PropertyType::List => format!("[{}]", values.join(", ")),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_tree(&self, node: &ConfigurationNode) -> Result<String> {
        let mut out = String::new();
        Self::write_node(&mut out, node, 0);
        Ok(out.trim_end().to_string())
    }

    fn format_summary(&self, summary: &ModelSummary) -> Result<String> {
        if summary.groups.is_empty() {
            return Ok("No modules.".to_string());
        }

        let mut lines = Vec::new();
        for group in &summary.groups {
            lines.push(format!("group {}", group.name));
            for project in &group.projects {
                lines.push(format!("  project {}", project.name));
                for module in &project.modules {
                    match module.origin {
                        Some(ref origin) => {
                            lines.push(format!("    module {} ({origin})", module.name));
                        }
                        None => lines.push(format!("    module {}", module.name)),
                    }
                }
            }
        }

        if !summary.namespaces.is_empty() {
            lines.push("namespaces:".to_string());
            for ns in &summary.namespaces {
                lines.push(format!("  {} = {}", ns.prefix, ns.uri));
            }
        }

        if !summary.web_file_bundles.is_empty() {
            lines.push("web file bundles:".to_string());
            for bundle in &summary.web_file_bundles {
                lines.push(format!("  {bundle}"));
            }
        }

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ConfigurationModel, ConfigurationModelBuilder, DefinitionNode, DefinitionProperty, Group,
        ValueType,
    };
    use crate::path::{NodePath, PathSegment};

    fn model() -> ConfigurationModel {
        let mut group = Group::new("g");
        group
            .add_project("p")
            .add_module("m")
            .unwrap()
            .add_config_source("main.yaml")
            .add_namespace("ns", "http://example.com/ns")
            .add_web_file_bundle("site")
            .add_config_definition(
                NodePath::parse("/a").unwrap(),
                DefinitionNode::new()
                    .with_property(DefinitionProperty::string("title", "hello"))
                    .with_property(DefinitionProperty::list(
                        "tags",
                        ValueType::String,
                        vec!["x".into(), "y".into()],
                    ))
                    .with_node(PathSegment::new("b"), DefinitionNode::new()),
            );

        let mut builder = ConfigurationModelBuilder::new();
        builder.add_group(group).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_text_tree() {
        let model = model();
        let output = TextFormatter.format_tree(model.root()).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "/");
        assert!(lines.contains(&"  - jcr:primaryType = rep:root"));
        assert!(lines.contains(&"  /a"));
        assert!(lines.contains(&"    - title = hello"));
        assert!(lines.contains(&"    - tags = [x, y]"));
        assert!(lines.contains(&"    /a/b"));
    }

    #[test]
    fn test_text_tree_exact_lines_with_category() {
        let mut group = Group::new("g");
        group
            .add_project("p")
            .add_module("m")
            .unwrap()
            .add_config_source("main.yaml")
            .add_config_definition(
                NodePath::parse("/r").unwrap(),
                DefinitionNode::new().with_category(Category::Runtime),
            );
        let mut builder = ConfigurationModelBuilder::new();
        builder.add_group(group).unwrap();
        let model = builder.build().unwrap();

        let output = TextFormatter.format_tree(model.root()).unwrap();
        assert_eq!(
            output,
            "/\n  - jcr:primaryType = rep:root\n  - jcr:mixinTypes = []\n  /r (runtime)"
        );
    }

    #[test]
    fn test_text_subtree() {
        let model = model();
        let output = TextFormatter
            .format_tree(model.resolve_node("/a/b").unwrap())
            .unwrap();
        assert_eq!(output, "/a/b");
    }

    #[test]
    fn test_json_tree_parses() {
        let model = model();
        let output = JsonFormatter.format_tree(model.root()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        let a = &parsed["children"]["a[1]"];
        assert_eq!(a["path"], "/a");
        assert_eq!(a["properties"]["title"]["values"][0], "hello");
        assert_eq!(a["properties"]["tags"]["type"], "list");
        assert_eq!(a["sources"][0], "[g/p/m] main.yaml");
    }

    #[test]
    fn test_yaml_tree_contains_paths() {
        let model = model();
        let output = YamlFormatter.format_tree(model.root()).unwrap();
        assert!(output.contains("path: /a/b"));
    }

    #[test]
    fn test_summary_formats() {
        let model = model();
        let summary = ModelSummary::from(&model);

        let text = TextFormatter.format_summary(&summary).unwrap();
        assert!(text.contains("group g"));
        assert!(text.contains("    module m"));
        assert!(text.contains("  ns = http://example.com/ns"));
        assert!(text.contains("  site"));

        let json = JsonFormatter.format_summary(&summary).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["groups"][0]["projects"][0]["modules"][0]["name"], "m");
        assert_eq!(parsed["web_file_bundles"][0], "site");
    }

    #[test]
    fn test_empty_summary() {
        let model = ConfigurationModelBuilder::new().build().unwrap();
        let text = TextFormatter
            .format_summary(&ModelSummary::from(&model))
            .unwrap();
        assert_eq!(text, "No modules.");
    }
}
