//! Parsing of definition source documents.
//!
//! A source is a YAML mapping with a single `definitions` key:
//!
//! ```yaml
//! definitions:
//!   namespace:
//!     - prefix: myns
//!       uri: http://example.org/myns/1.0
//!   webfilebundle: [site]
//!   config:
//!     /a:
//!       p1: bla1
//!       p2: [bla1, bla2]
//!       /b:
//!         .meta:order-before: c
//!         p3: {type: long, value: 42}
//! ```

use std::fs;
use std::path::{Component, Path};

use serde::Deserialize;
use serde_yaml::{Mapping, Value as Yaml};

use crate::error::{Error, Result};
use crate::model::{
    Category, DefinitionNode, DefinitionProperty, PropertyOperation, Resource, Source, SourceKind,
    Value, ValueType, JCR_MIXIN_TYPES, JCR_PRIMARY_TYPE,
};
use crate::path::{NodePath, PathSegment};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourceDocument {
    #[serde(default)]
    definitions: DefinitionsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefinitionsSection {
    #[serde(default)]
    namespace: Vec<NamespaceEntry>,
    #[serde(default)]
    webfilebundle: Vec<String>,
    #[serde(default)]
    config: Mapping,
    #[serde(default)]
    content: Mapping,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NamespaceEntry {
    prefix: String,
    uri: String,
}

/// Parses one source document into a [`Source`].
pub(crate) struct DocumentParser<'a> {
    file: &'a Path,
}

impl<'a> DocumentParser<'a> {
    pub(crate) fn new(file: &'a Path) -> Self {
        Self { file }
    }

    fn invalid(&self, at: &str, message: impl Into<String>) -> Error {
        Error::Validation {
            field: format!("{}: {at}", self.file.display()),
            message: message.into(),
        }
    }

    /// Parse `text` and append its definitions to `source`.
    pub(crate) fn parse_into(&self, text: &str, source: &mut Source) -> Result<()> {
        let document: SourceDocument = serde_yaml::from_str(text).map_err(|e| Error::Validation {
            field: self.file.display().to_string(),
            message: e.to_string(),
        })?;
        let section = document.definitions;
        let kind = source.location().kind();

        match kind {
            SourceKind::Config if !section.content.is_empty() => {
                return Err(self.invalid("definitions", "content definitions belong in content sources"));
            }
            SourceKind::Content
                if !section.config.is_empty()
                    || !section.namespace.is_empty()
                    || !section.webfilebundle.is_empty() =>
            {
                return Err(self.invalid("definitions", "content sources may only contain content definitions"));
            }
            _ => {}
        }

        for namespace in section.namespace {
            source.add_namespace(namespace.prefix, namespace.uri);
        }
        for bundle in section.webfilebundle {
            source.add_web_file_bundle(bundle);
        }
        for (key, body) in &section.config {
            let root = self.root_path(key)?;
            let node = self.parse_node(body, &root.to_string())?;
            source.add_config_definition(root, node);
        }
        for (key, body) in &section.content {
            let root = self.root_path(key)?;
            let node = self.parse_node(body, &root.to_string())?;
            source.add_content_definition(root, node);
        }
        Ok(())
    }

    fn root_path(&self, key: &Yaml) -> Result<NodePath> {
        let Some(text) = key.as_str() else {
            return Err(self.invalid("definitions", "definition root must be a string path"));
        };
        NodePath::parse(text)
    }

    fn parse_node(&self, body: &Yaml, at: &str) -> Result<DefinitionNode> {
        let mut node = DefinitionNode::new();
        let mapping = match body {
            Yaml::Null => return Ok(node),
            Yaml::Mapping(mapping) => mapping,
            _ => return Err(self.invalid(at, "node body must be a mapping")),
        };

        for (key, value) in mapping {
            let Some(key) = key.as_str() else {
                return Err(self.invalid(at, "keys must be strings"));
            };
            if let Some(child) = key.strip_prefix('/') {
                let segment = PathSegment::parse(child)?;
                let child_at = format!("{}/{child}", at.trim_end_matches('/'));
                node.add_node(segment, self.parse_node(value, &child_at)?);
            } else if let Some(directive) = key.strip_prefix(".meta:") {
                node = self.apply_directive(node, directive, value, at)?;
            } else {
                node.add_property(self.parse_property(key, value, at)?);
            }
        }
        Ok(node)
    }

    fn apply_directive(
        &self,
        node: DefinitionNode,
        directive: &str,
        value: &Yaml,
        at: &str,
    ) -> Result<DefinitionNode> {
        let boolean = || {
            value
                .as_bool()
                .ok_or_else(|| self.invalid(at, format!("'.meta:{directive}' must be a boolean")))
        };
        let category = || -> Result<Category> {
            value
                .as_str()
                .ok_or_else(|| self.invalid(at, format!("'.meta:{directive}' must be a string")))?
                .parse()
        };

        Ok(match directive {
            "delete" => node.with_delete(boolean()?),
            "order-before" => match value {
                Yaml::Null => node.with_order_before(""),
                Yaml::String(target) => node.with_order_before(target.as_str()),
                _ => return Err(self.invalid(at, "'.meta:order-before' must be a node name")),
            },
            "ignore-reordered-children" => node.with_ignore_reordered_children(boolean()?),
            "category" => node.with_category(category()?),
            "residual-child-node-category" => node.with_residual_child_node_category(category()?),
            "residual-child-property-category" => {
                node.with_residual_child_property_category(category()?)
            }
            _ => return Err(self.invalid(at, format!("unknown directive '.meta:{directive}'"))),
        })
    }

    fn parse_property(&self, name: &str, value: &Yaml, at: &str) -> Result<DefinitionProperty> {
        let at = format!("{}/{name}", at.trim_end_matches('/'));
        match value {
            Yaml::Mapping(mapping) => self.parse_property_mapping(name, mapping, &at),
            Yaml::Sequence(items) => {
                let (value_type, values) = self.inline_list(items, builtin_type(name), &at)?;
                Ok(DefinitionProperty::list(name, value_type, values))
            }
            scalar => {
                let (inferred, text) = self.scalar(scalar, &at)?;
                let value_type = builtin_type(name).unwrap_or(inferred);
                Ok(DefinitionProperty::single(name, value_type, Value::Inline(text)))
            }
        }
    }

    fn parse_property_mapping(
        &self,
        name: &str,
        mapping: &Mapping,
        at: &str,
    ) -> Result<DefinitionProperty> {
        let mut explicit_type = None;
        let mut operation = PropertyOperation::Replace;
        let mut category = None;
        let mut value = None;
        let mut resource = None;

        for (key, field) in mapping {
            let text = |what: &str| {
                field
                    .as_str()
                    .ok_or_else(|| self.invalid(at, format!("'{what}' must be a string")))
            };
            match key.as_str() {
                Some("type") => explicit_type = Some(text("type")?.parse::<ValueType>()?),
                Some("operation") => operation = text("operation")?.parse()?,
                Some(".meta:category") => category = Some(text(".meta:category")?.parse::<Category>()?),
                Some("value") => value = Some(field),
                Some("resource") => resource = Some(field),
                _ => return Err(self.invalid(at, format!("unknown property key {key:?}"))),
            }
        }

        if operation == PropertyOperation::Delete {
            return Ok(DefinitionProperty::delete(name));
        }
        let inline_type = explicit_type.or_else(|| builtin_type(name));

        let property = match (value, resource) {
            (Some(_), Some(_)) => {
                return Err(self.invalid(at, "'value' and 'resource' are mutually exclusive"));
            }
            (Some(Yaml::Sequence(items)), None) => {
                let (value_type, values) = self.inline_list(items, inline_type, at)?;
                DefinitionProperty::list(name, value_type, values)
            }
            (Some(scalar), None) => {
                let (inferred, text) = self.scalar(scalar, at)?;
                DefinitionProperty::single(name, inline_type.unwrap_or(inferred), Value::Inline(text))
            }
            (None, Some(Yaml::Sequence(items))) => {
                let values = items
                    .iter()
                    .map(|item| self.resource(item, at))
                    .collect::<Result<Vec<_>>>()?;
                DefinitionProperty::list(name, explicit_type.unwrap_or(ValueType::Binary), values)
            }
            (None, Some(item)) => DefinitionProperty::single(
                name,
                explicit_type.unwrap_or(ValueType::Binary),
                self.resource(item, at)?,
            ),
            (None, None) => match category {
                Some(category) => return Ok(DefinitionProperty::category_only(name, category)),
                None => return Err(self.invalid(at, "property has neither 'value' nor 'resource'")),
            },
        };

        let property = property.with_operation(operation);
        Ok(match category {
            Some(category) => property.with_category(category),
            None => property,
        })
    }

    fn scalar(&self, value: &Yaml, at: &str) -> Result<(ValueType, String)> {
        match value {
            Yaml::String(text) => Ok((ValueType::String, text.clone())),
            Yaml::Bool(flag) => Ok((ValueType::Boolean, flag.to_string())),
            Yaml::Number(number) if number.is_f64() => Ok((ValueType::Double, number.to_string())),
            Yaml::Number(number) => Ok((ValueType::Long, number.to_string())),
            Yaml::Null => Err(self.invalid(at, "property value cannot be null")),
            _ => Err(self.invalid(at, "expected a scalar value")),
        }
    }

    fn inline_list(
        &self,
        items: &[Yaml],
        explicit_type: Option<ValueType>,
        at: &str,
    ) -> Result<(ValueType, Vec<Value>)> {
        let mut inferred: Option<ValueType> = None;
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            let (value_type, text) = self.scalar(item, at)?;
            match inferred {
                Some(previous) if previous != value_type && explicit_type.is_none() => {
                    return Err(self.invalid(
                        at,
                        format!("list mixes '{previous}' and '{value_type}' values"),
                    ));
                }
                Some(_) => {}
                None => inferred = Some(value_type),
            }
            values.push(Value::Inline(text));
        }
        let value_type = explicit_type.or(inferred).unwrap_or(ValueType::String);
        Ok((value_type, values))
    }

    fn resource(&self, item: &Yaml, at: &str) -> Result<Value> {
        let Some(relative) = item.as_str() else {
            return Err(self.invalid(at, "'resource' must be a file path"));
        };
        let escapes = Path::new(relative)
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if relative.is_empty() || escapes {
            return Err(self.invalid(
                at,
                format!("resource '{relative}' must be a relative path inside the source directory"),
            ));
        }
        let base = self.file.parent().unwrap_or_else(|| Path::new(""));
        let path = base.join(relative);
        let content = fs::read(&path).map_err(|source| Error::Read { path, source })?;
        Ok(Value::Resource(Resource::new(relative, content)))
    }
}

/// Value type of the built-in type properties, which hold names.
fn builtin_type(name: &str) -> Option<ValueType> {
    (name == JCR_PRIMARY_TYPE || name == JCR_MIXIN_TYPES).then_some(ValueType::Name)
}
