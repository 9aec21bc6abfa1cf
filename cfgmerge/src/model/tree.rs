//! The immutable configuration tree produced by a build.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::model::source::SourceLocation;
use crate::model::value::{Category, PropertyType, Value, ValueType};
use crate::path::{NodePath, PathSegment};

fn serialize_origins<S>(origins: &[Arc<SourceLocation>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(origins.iter().map(ToString::to_string))
}

/// A merged property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationProperty {
    #[serde(skip)]
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) property_type: PropertyType,
    pub(crate) value_type: ValueType,
    pub(crate) values: Vec<Value>,
    #[serde(rename = "sources", serialize_with = "serialize_origins")]
    pub(crate) defining_sources: Vec<Arc<SourceLocation>>,
}

impl ConfigurationProperty {
    pub(crate) fn new(
        name: impl Into<String>,
        property_type: PropertyType,
        value_type: ValueType,
        values: Vec<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            property_type,
            value_type,
            values,
            defining_sources: Vec::new(),
        }
    }

    /// Property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Single or list.
    #[must_use]
    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    /// Type of the values.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// All values in order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The value of a single-valued property.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self.property_type {
            PropertyType::Single => self.values.first(),
            PropertyType::List => None,
        }
    }

    /// Sources that defined or modified this property, oldest first.
    #[must_use]
    pub fn defining_sources(&self) -> &[Arc<SourceLocation>] {
        &self.defining_sources
    }
}

/// A node of the merged configuration tree.
///
/// Children are keyed by `name[index]`; lookups accept either the plain name
/// (index 1) or the explicit form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationNode {
    #[serde(skip)]
    pub(crate) segment: Option<PathSegment>,
    pub(crate) path: NodePath,
    pub(crate) category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) residual_child_node_category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) residual_child_property_category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) ignore_reordered_children: Option<bool>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub(crate) property_categories: IndexMap<String, Category>,
    pub(crate) properties: IndexMap<String, ConfigurationProperty>,
    pub(crate) children: IndexMap<String, ConfigurationNode>,
    #[serde(rename = "sources", serialize_with = "serialize_origins")]
    pub(crate) defining_sources: Vec<Arc<SourceLocation>>,
}

impl ConfigurationNode {
    /// Node name; empty for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        self.segment.as_ref().map_or("", PathSegment::name)
    }

    /// 1-based same-name-sibling index; 1 for the root.
    #[must_use]
    pub fn sns_index(&self) -> usize {
        self.segment.as_ref().map_or(1, PathSegment::index)
    }

    /// Absolute path of the node.
    #[must_use]
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// Whether this is the root node.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segment.is_none()
    }

    /// Effective category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Explicit residual category for undeclared child nodes.
    #[must_use]
    pub fn residual_child_node_category(&self) -> Option<Category> {
        self.residual_child_node_category
    }

    /// Explicit residual category for undeclared properties.
    #[must_use]
    pub fn residual_child_property_category(&self) -> Option<Category> {
        self.residual_child_property_category
    }

    /// Explicit `ignore-reordered-children` setting.
    #[must_use]
    pub fn ignore_reordered_children(&self) -> Option<bool> {
        self.ignore_reordered_children
    }

    /// Properties in definition order.
    #[must_use]
    pub fn properties(&self) -> &IndexMap<String, ConfigurationProperty> {
        &self.properties
    }

    /// Look up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&ConfigurationProperty> {
        self.properties.get(name)
    }

    /// Children in sibling order.
    pub fn children(&self) -> impl Iterator<Item = &ConfigurationNode> {
        self.children.values()
    }

    /// Look up a child by `name` or `name[index]`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&ConfigurationNode> {
        let segment = PathSegment::parse(name).ok()?;
        self.children.get(&segment.key())
    }

    /// Sources that defined this node's own content, oldest first.
    #[must_use]
    pub fn defining_sources(&self) -> &[Arc<SourceLocation>] {
        &self.defining_sources
    }

    /// Resolve a descendant by path relative to this node.
    #[must_use]
    pub fn resolve(&self, path: &NodePath) -> Option<&ConfigurationNode> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.children.get(&segment.key()))
    }

    /// Effective category of the child node called `name`, declared or not.
    #[must_use]
    pub fn child_node_category(&self, name: &str) -> Category {
        if let Some(child) = self.child(name) {
            return child.category;
        }
        self.residual_child_node_category
            .unwrap_or_else(|| default_child_node_category(self.is_root()))
    }

    /// Effective category of the property called `name`, declared or not.
    #[must_use]
    pub fn child_property_category(&self, name: &str) -> Category {
        if let Some(category) = self.property_categories.get(name) {
            return *category;
        }
        if self.properties.contains_key(name) {
            return Category::Config;
        }
        self.residual_child_property_category
            .unwrap_or(Category::Config)
    }
}

/// Category of an undeclared child node when no residual category is set.
pub(crate) fn default_child_node_category(is_root: bool) -> Category {
    if is_root {
        Category::Runtime
    } else {
        Category::Config
    }
}
