//! Definitions: the units of requested change contributed by a source.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::model::source::SourceLocation;
use crate::model::value::{Category, PropertyOperation, PropertyType, Value, ValueType};
use crate::path::{NodePath, PathSegment};

/// A requested change to one property.
///
/// # Examples
///
/// ```
/// use cfgmerge::model::{DefinitionProperty, PropertyOperation, ValueType};
///
/// let property = DefinitionProperty::list(
///     "property1",
///     ValueType::String,
///     vec!["bla3".into(), "bla2".into()],
/// )
/// .with_operation(PropertyOperation::Add);
///
/// assert_eq!(property.values().len(), 2);
/// assert_eq!(property.operation(), PropertyOperation::Add);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionProperty {
    name: String,
    property_type: PropertyType,
    value_type: ValueType,
    values: Vec<Value>,
    operation: PropertyOperation,
    category: Option<Category>,
}

impl DefinitionProperty {
    /// A single-valued property.
    #[must_use]
    pub fn single(name: impl Into<String>, value_type: ValueType, value: Value) -> Self {
        Self {
            name: name.into(),
            property_type: PropertyType::Single,
            value_type,
            values: vec![value],
            operation: PropertyOperation::Replace,
            category: None,
        }
    }

    /// A single-valued string property.
    #[must_use]
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::single(name, ValueType::String, Value::Inline(value.into()))
    }

    /// A list property.
    #[must_use]
    pub fn list(name: impl Into<String>, value_type: ValueType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            property_type: PropertyType::List,
            value_type,
            values,
            operation: PropertyOperation::Replace,
            category: None,
        }
    }

    /// A request to delete a property.
    #[must_use]
    pub fn delete(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_type: PropertyType::Single,
            value_type: ValueType::String,
            values: Vec::new(),
            operation: PropertyOperation::Delete,
            category: None,
        }
    }

    /// A property carrying only a category directive.
    #[must_use]
    pub fn category_only(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            property_type: PropertyType::Single,
            value_type: ValueType::String,
            values: Vec::new(),
            operation: PropertyOperation::Replace,
            category: Some(category),
        }
    }

    /// Set the operation.
    #[must_use]
    pub fn with_operation(mut self, operation: PropertyOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Set the `.meta:category` directive.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Requested multiplicity.
    #[must_use]
    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    /// Requested value type.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Requested values.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Requested operation.
    #[must_use]
    pub fn operation(&self) -> PropertyOperation {
        self.operation
    }

    /// Requested category, if any.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Whether the definition carries values to fold into the tree.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.operation == PropertyOperation::Delete
            || !(self.category.is_some() && self.values.is_empty())
    }
}

/// The requested shape of one node and its subtree.
///
/// # Examples
///
/// ```
/// use cfgmerge::model::{DefinitionNode, DefinitionProperty};
/// use cfgmerge::path::PathSegment;
///
/// let node = DefinitionNode::new()
///     .with_property(DefinitionProperty::string("p1", "bla1"))
///     .with_node(PathSegment::new("child"), DefinitionNode::new().with_order_before("other"));
///
/// assert!(node.has_own_content());
/// assert_eq!(node.nodes().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionNode {
    delete: bool,
    order_before: Option<String>,
    ignore_reordered_children: Option<bool>,
    category: Option<Category>,
    residual_child_node_category: Option<Category>,
    residual_child_property_category: Option<Category>,
    properties: IndexMap<String, DefinitionProperty>,
    nodes: IndexMap<PathSegment, DefinitionNode>,
}

impl DefinitionNode {
    /// An empty node body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A node body carrying only `.meta:delete: true`.
    #[must_use]
    pub fn deleted() -> Self {
        Self {
            delete: true,
            ..Self::default()
        }
    }

    /// Set `.meta:delete`.
    #[must_use]
    pub fn with_delete(mut self, delete: bool) -> Self {
        self.delete = delete;
        self
    }

    /// Set `.meta:order-before`; an empty name means "first".
    #[must_use]
    pub fn with_order_before(mut self, sibling: impl Into<String>) -> Self {
        self.order_before = Some(sibling.into());
        self
    }

    /// Set `.meta:ignore-reordered-children`.
    #[must_use]
    pub fn with_ignore_reordered_children(mut self, ignore: bool) -> Self {
        self.ignore_reordered_children = Some(ignore);
        self
    }

    /// Set `.meta:category`.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Set `.meta:residual-child-node-category`.
    #[must_use]
    pub fn with_residual_child_node_category(mut self, category: Category) -> Self {
        self.residual_child_node_category = Some(category);
        self
    }

    /// Set `.meta:residual-child-property-category`.
    #[must_use]
    pub fn with_residual_child_property_category(mut self, category: Category) -> Self {
        self.residual_child_property_category = Some(category);
        self
    }

    /// Add a property; a later property with the same name replaces it.
    #[must_use]
    pub fn with_property(mut self, property: DefinitionProperty) -> Self {
        self.add_property(property);
        self
    }

    /// Add a child node; a later child with the same segment replaces it.
    #[must_use]
    pub fn with_node(mut self, segment: PathSegment, node: DefinitionNode) -> Self {
        self.add_node(segment, node);
        self
    }

    /// Add a property in place.
    pub fn add_property(&mut self, property: DefinitionProperty) {
        self.properties.insert(property.name.clone(), property);
    }

    /// Add a child node in place.
    pub fn add_node(&mut self, segment: PathSegment, node: DefinitionNode) {
        self.nodes.insert(segment, node);
    }

    /// Whether `.meta:delete` is set.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.delete
    }

    /// The `.meta:order-before` target.
    #[must_use]
    pub fn order_before(&self) -> Option<&str> {
        self.order_before.as_deref()
    }

    /// The `.meta:ignore-reordered-children` value.
    #[must_use]
    pub fn ignore_reordered_children(&self) -> Option<bool> {
        self.ignore_reordered_children
    }

    /// The `.meta:category` value.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// The `.meta:residual-child-node-category` value.
    #[must_use]
    pub fn residual_child_node_category(&self) -> Option<Category> {
        self.residual_child_node_category
    }

    /// The `.meta:residual-child-property-category` value.
    #[must_use]
    pub fn residual_child_property_category(&self) -> Option<Category> {
        self.residual_child_property_category
    }

    /// Property definitions in author order.
    #[must_use]
    pub fn properties(&self) -> &IndexMap<String, DefinitionProperty> {
        &self.properties
    }

    /// Child node definitions in author order.
    #[must_use]
    pub fn nodes(&self) -> &IndexMap<PathSegment, DefinitionNode> {
        &self.nodes
    }

    /// Whether the body defines anything about the node itself: properties
    /// or any `.meta:` directive other than delete.
    #[must_use]
    pub fn has_own_content(&self) -> bool {
        !self.properties.is_empty()
            || self.order_before.is_some()
            || self.ignore_reordered_children.is_some()
            || self.category.is_some()
            || self.residual_child_node_category.is_some()
            || self.residual_child_property_category.is_some()
    }

    /// Whether the body carries anything besides `.meta:delete`.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.has_own_content() || !self.nodes.is_empty()
    }
}

/// A definition carrying a node tree rooted at a path.
///
/// Used for both config and content definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeDefinition {
    origin: Arc<SourceLocation>,
    root: NodePath,
    node: DefinitionNode,
}

impl TreeDefinition {
    /// Create a tree definition.
    #[must_use]
    pub fn new(origin: Arc<SourceLocation>, root: NodePath, node: DefinitionNode) -> Self {
        Self { origin, root, node }
    }

    /// The source the definition comes from.
    #[must_use]
    pub fn origin(&self) -> &Arc<SourceLocation> {
        &self.origin
    }

    /// The root path.
    #[must_use]
    pub fn root(&self) -> &NodePath {
        &self.root
    }

    /// The node body at the root path.
    #[must_use]
    pub fn node(&self) -> &DefinitionNode {
        &self.node
    }
}

/// A namespace prefix declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDefinition {
    origin: Arc<SourceLocation>,
    prefix: String,
    uri: String,
}

impl NamespaceDefinition {
    /// Create a namespace declaration.
    #[must_use]
    pub fn new(origin: Arc<SourceLocation>, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            origin,
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }

    /// The source the declaration comes from.
    #[must_use]
    pub fn origin(&self) -> &Arc<SourceLocation> {
        &self.origin
    }

    /// The prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The namespace URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// A web file bundle declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebFileBundleDefinition {
    origin: Arc<SourceLocation>,
    name: String,
}

impl WebFileBundleDefinition {
    /// Create a bundle declaration.
    #[must_use]
    pub fn new(origin: Arc<SourceLocation>, name: impl Into<String>) -> Self {
        Self {
            origin,
            name: name.into(),
        }
    }

    /// The source the declaration comes from.
    #[must_use]
    pub fn origin(&self) -> &Arc<SourceLocation> {
        &self.origin
    }

    /// The bundle name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Any definition a source can contribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// Merged into the configuration tree.
    Config(TreeDefinition),
    /// Applied after configuration; never merged into the tree.
    Content(TreeDefinition),
    /// Namespace prefix registration.
    Namespace(NamespaceDefinition),
    /// Web file bundle registration.
    WebFileBundle(WebFileBundleDefinition),
}

impl Definition {
    /// The source the definition comes from.
    #[must_use]
    pub fn origin(&self) -> &Arc<SourceLocation> {
        match self {
            Self::Config(def) | Self::Content(def) => def.origin(),
            Self::Namespace(def) => def.origin(),
            Self::WebFileBundle(def) => def.origin(),
        }
    }

    /// Short name of the definition kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Content(_) => "content",
            Self::Namespace(_) => "namespace",
            Self::WebFileBundle(_) => "webfilebundle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_only_body_has_no_own_content() {
        let node = DefinitionNode::new().with_node(PathSegment::new("c"), DefinitionNode::new());
        assert!(!node.has_own_content());
        assert!(node.has_content());
    }

    #[test]
    fn test_delete_only_body_has_no_content() {
        let node = DefinitionNode::deleted();
        assert!(node.is_delete());
        assert!(!node.has_content());
    }

    #[test]
    fn test_meta_directives_count_as_own_content() {
        assert!(DefinitionNode::new().with_order_before("").has_own_content());
        assert!(DefinitionNode::new()
            .with_ignore_reordered_children(true)
            .has_own_content());
        assert!(DefinitionNode::new()
            .with_residual_child_node_category(Category::Content)
            .has_own_content());
    }

    #[test]
    fn test_later_property_replaces_earlier() {
        let node = DefinitionNode::new()
            .with_property(DefinitionProperty::string("p", "one"))
            .with_property(DefinitionProperty::string("p", "two"));
        assert_eq!(node.properties().len(), 1);
        assert_eq!(node.properties()["p"].values(), &[Value::from("two")]);
    }

    #[test]
    fn test_category_only_property_has_no_value() {
        let property = DefinitionProperty::category_only("p", Category::Runtime);
        assert!(!property.has_value());
        assert!(DefinitionProperty::delete("p").has_value());
        assert!(DefinitionProperty::string("p", "v")
            .with_category(Category::Config)
            .has_value());
    }
}
