//! Arena-backed merge of definitions into one configuration tree.

use std::mem;
use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{
    values_equivalent, values_superset, Category, ConfigurationNode, ConfigurationProperty,
    DefinitionNode, DefinitionProperty, PropertyOperation, PropertyType, SourceLocation,
    TreeDefinition, Value, ValueType, JCR_MIXIN_TYPES, JCR_PRIMARY_TYPE, ROOT_PRIMARY_TYPE,
};
use crate::path::{NodePath, PathSegment};

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug)]
struct ArenaNode {
    segment: Option<PathSegment>,
    parent: Option<NodeId>,
    category: Category,
    residual_child_node_category: Option<Category>,
    residual_child_property_category: Option<Category>,
    ignore_reordered_children: Option<bool>,
    properties: IndexMap<String, ConfigurationProperty>,
    property_categories: IndexMap<String, Category>,
    children: IndexMap<String, NodeId>,
    defining_sources: Vec<Arc<SourceLocation>>,
}

impl ArenaNode {
    fn new(segment: Option<PathSegment>, parent: Option<NodeId>) -> Self {
        Self {
            segment,
            parent,
            category: Category::Config,
            residual_child_node_category: None,
            residual_child_property_category: None,
            ignore_reordered_children: None,
            properties: IndexMap::new(),
            property_categories: IndexMap::new(),
            children: IndexMap::new(),
            defining_sources: Vec::new(),
        }
    }

    fn root() -> Self {
        let mut root = Self::new(None, None);
        root.properties.insert(
            JCR_PRIMARY_TYPE.to_string(),
            ConfigurationProperty::new(
                JCR_PRIMARY_TYPE,
                PropertyType::Single,
                ValueType::Name,
                vec![Value::from(ROOT_PRIMARY_TYPE)],
            ),
        );
        root.properties.insert(
            JCR_MIXIN_TYPES.to_string(),
            ConfigurationProperty::new(JCR_MIXIN_TYPES, PropertyType::List, ValueType::Name, Vec::new()),
        );
        root
    }

    fn clear(&mut self) {
        self.residual_child_node_category = None;
        self.residual_child_property_category = None;
        self.ignore_reordered_children = None;
        self.properties.clear();
        self.property_categories.clear();
        self.children.clear();
    }

    fn attribute(&mut self, origin: &Arc<SourceLocation>) {
        self.defining_sources.push(Arc::clone(origin));
    }
}

/// Index 1 is stored without an explicit index so paths display as authored.
fn canonical_segment(name: &str, index: usize) -> PathSegment {
    if index == 1 {
        PathSegment::new(name)
    } else {
        PathSegment::indexed(name, index)
    }
}

fn describe_origins(origins: &[Arc<SourceLocation>]) -> String {
    origins
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_values(values: &[Value]) -> String {
    let values: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", values.join(", "))
}

/// Folds config definitions, one at a time, into a single tree.
///
/// Nodes live in an arena and refer to their parent by index, so deleting a
/// same-name sibling is a re-key of the parent's child map. Recoverable
/// conditions are logged as warnings; conflicts abort the current push.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use cfgmerge::model::{
///     DefinitionNode, DefinitionProperty, SourceKind, SourceLocation, TreeDefinition,
/// };
/// use cfgmerge::path::NodePath;
/// use cfgmerge::tree::ConfigurationTreeBuilder;
///
/// let origin = Arc::new(SourceLocation::new("g/p/m", "config.yaml", SourceKind::Config));
/// let definition = TreeDefinition::new(
///     origin,
///     NodePath::parse("/a").unwrap(),
///     DefinitionNode::new().with_property(DefinitionProperty::string("p1", "bla1")),
/// );
///
/// let mut builder = ConfigurationTreeBuilder::new();
/// builder.push(&definition).unwrap();
/// let root = builder.build();
///
/// let a = root.child("a").unwrap();
/// assert_eq!(a.property("p1").unwrap().values()[0].to_string(), "bla1");
/// ```
#[derive(Debug)]
pub struct ConfigurationTreeBuilder {
    nodes: Vec<ArenaNode>,
}

impl Default for ConfigurationTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationTreeBuilder {
    /// Create a builder holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![ArenaNode::root()],
        }
    }

    /// Fold one definition into the tree.
    ///
    /// # Errors
    ///
    /// Fails on unreachable roots, missing same-name siblings, invalid
    /// `order-before` targets and property conflicts. A failed push may leave
    /// the tree partially modified.
    pub fn push(&mut self, definition: &TreeDefinition) -> Result<()> {
        let origin = definition.origin();
        let def = definition.node();
        let root_path = definition.root();
        debug!("Merging definition '{root_path}' from {origin}");

        if root_path.is_root() {
            if def.is_delete() {
                return Err(Error::Validation {
                    field: root_path.to_string(),
                    message: format!("{origin} cannot delete the root node"),
                });
            }
            if def.category().is_some_and(|c| !c.is_config()) {
                return Err(Error::Validation {
                    field: root_path.to_string(),
                    message: format!("{origin} cannot change the category of the root node"),
                });
            }
            return self.merge_node(ROOT, def, origin, false);
        }

        let segments = root_path.segments();
        let mut current = ROOT;
        for (depth, segment) in segments.iter().enumerate() {
            if !self.nodes[current].category.is_config() {
                warn!(
                    "Trying to modify non-configuration node '{root_path}', defined in '{origin}'. Skipping."
                );
                return Ok(());
            }

            let is_last = depth + 1 == segments.len();
            if let Some(&child) = self.nodes[current].children.get(&segment.key()) {
                current = child;
                continue;
            }

            if def.is_delete() && !def.has_content() {
                warn!("Trying to delete node '{root_path}' that does not exist, defined in '{origin}'.");
                return Ok(());
            }
            if !is_last {
                return Err(Error::UnreachableNode {
                    origin: origin.to_string(),
                    path: root_path.to_string(),
                    closest_ancestor: self.path(current).to_string(),
                });
            }
            if def.is_delete() {
                warn!(
                    "Trying to merge delete node '{root_path}' that does not exist, defined in '{origin}'."
                );
            }
            let child = self.create_child(current, segment, origin)?;
            return self.merge_node(child, def, origin, true);
        }

        self.merge_node(current, def, origin, false)
    }

    /// Finish the build and hand out the immutable tree.
    #[must_use]
    pub fn build(mut self) -> ConfigurationNode {
        self.materialize(ROOT, NodePath::root())
    }

    fn path(&self, id: NodeId) -> NodePath {
        let mut segments = Vec::new();
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            if let Some(segment) = &self.nodes[current].segment {
                segments.push(segment.clone());
            }
            current = parent;
        }
        segments.reverse();
        NodePath::from_segments(segments)
    }

    fn create_child(
        &mut self,
        parent: NodeId,
        segment: &PathSegment,
        origin: &Arc<SourceLocation>,
    ) -> Result<NodeId> {
        let index = segment.index();
        if index > 1 {
            let sibling = segment.with_index(index - 1);
            if !self.nodes[parent].children.contains_key(&sibling.key()) {
                return Err(Error::MissingSibling {
                    origin: origin.to_string(),
                    path: self.path(parent).child(segment.clone()).to_string(),
                    sibling: sibling.to_string(),
                });
            }
        }

        let id = self.nodes.len();
        self.nodes.push(ArenaNode::new(
            Some(canonical_segment(segment.name(), index)),
            Some(parent),
        ));
        self.nodes[parent].children.insert(segment.key(), id);
        Ok(id)
    }

    fn merge_node(
        &mut self,
        id: NodeId,
        def: &DefinitionNode,
        origin: &Arc<SourceLocation>,
        created: bool,
    ) -> Result<()> {
        if def.is_delete() && !created {
            if def.has_content() {
                let node = &mut self.nodes[id];
                node.clear();
                node.category = Category::Config;
                node.defining_sources.clear();
            } else {
                self.delete_node(id);
                return Ok(());
            }
        }

        match def.category() {
            Some(category) if !category.is_config() => {
                self.make_placeholder(id, def, category, origin);
                if let Some(target) = def.order_before() {
                    self.order_before(id, target, origin, created)?;
                }
                return Ok(());
            }
            Some(_) => self.nodes[id].category = Category::Config,
            None if !self.nodes[id].category.is_config() => {
                warn!(
                    "Trying to modify non-configuration node '{}', defined in '{origin}'. Skipping.",
                    self.path(id)
                );
                return Ok(());
            }
            None => {}
        }

        if created || def.has_own_content() {
            self.nodes[id].attribute(origin);
        }

        if let Some(target) = def.order_before() {
            self.order_before(id, target, origin, created)?;
        }
        if let Some(ignore) = def.ignore_reordered_children() {
            self.set_ignore_reordered_children(id, ignore, origin);
        }
        if let Some(category) = def.residual_child_node_category() {
            self.nodes[id].residual_child_node_category = Some(category);
        }
        if let Some(category) = def.residual_child_property_category() {
            self.nodes[id].residual_child_property_category = Some(category);
        }

        for property in def.properties().values() {
            self.merge_property(id, property, origin)?;
        }

        for (segment, child_def) in def.nodes() {
            if let Some(&child) = self.nodes[id].children.get(&segment.key()) {
                self.merge_node(child, child_def, origin, false)?;
                continue;
            }

            let child_path = self.path(id).child(segment.clone());
            if child_def.is_delete() {
                if !child_def.has_content() {
                    warn!(
                        "Trying to delete node '{child_path}' that does not exist, defined in '{origin}'."
                    );
                    continue;
                }
                warn!(
                    "Trying to merge delete node '{child_path}' that does not exist, defined in '{origin}'."
                );
            }
            let child = self.create_child(id, segment, origin)?;
            self.merge_node(child, child_def, origin, true)?;
        }

        Ok(())
    }

    fn make_placeholder(
        &mut self,
        id: NodeId,
        def: &DefinitionNode,
        category: Category,
        origin: &Arc<SourceLocation>,
    ) {
        if !def.properties().is_empty() || !def.nodes().is_empty() {
            warn!(
                "Node '{}' defined in '{origin}' has category '{category}'; its properties and child nodes are ignored.",
                self.path(id)
            );
        }
        let node = &mut self.nodes[id];
        node.clear();
        node.category = category;
        node.attribute(origin);
    }

    fn delete_node(&mut self, id: NodeId) {
        let (Some(parent), Some(segment)) = (self.nodes[id].parent, self.nodes[id].segment.clone())
        else {
            return;
        };

        let siblings = mem::take(&mut self.nodes[parent].children);
        let mut children = IndexMap::with_capacity(siblings.len());
        for (key, child) in siblings {
            if child == id {
                continue;
            }
            let renamed = self.nodes[child]
                .segment
                .as_ref()
                .filter(|s| s.name() == segment.name() && s.index() > segment.index())
                .map(|s| canonical_segment(s.name(), s.index() - 1));
            match renamed {
                Some(renamed) => {
                    children.insert(renamed.key(), child);
                    self.nodes[child].segment = Some(renamed);
                }
                None => {
                    children.insert(key, child);
                }
            }
        }
        self.nodes[parent].children = children;
        self.nodes[id].parent = None;
    }

    fn order_before(
        &mut self,
        id: NodeId,
        target: &str,
        origin: &Arc<SourceLocation>,
        created: bool,
    ) -> Result<()> {
        let path = self.path(id);
        let (Some(parent), Some(segment)) = (self.nodes[id].parent, self.nodes[id].segment.clone())
        else {
            return Err(Error::InvalidOrderBefore {
                path: path.to_string(),
                target: target.to_string(),
                origin: origin.to_string(),
                reason: "the root node has no siblings".to_string(),
            });
        };
        let key = segment.key();

        if self.nodes[parent].ignore_reordered_children == Some(true) {
            warn!(
                "Potential unnecessary orderBefore: '{target}' for node '{path}', defined in '{origin}': parent '{}' already ignores reordered children.",
                self.path(parent)
            );
        }

        let invalid = |reason: &str| Error::InvalidOrderBefore {
            path: path.to_string(),
            target: target.to_string(),
            origin: origin.to_string(),
            reason: reason.to_string(),
        };

        let siblings = &self.nodes[parent].children;
        let Some(position) = siblings.get_index_of(&key) else {
            return Ok(());
        };

        let new_position = if target.is_empty() {
            if position == 0 {
                if !created {
                    warn!(
                        "Unnecessary orderBefore: '' for node '{path}', defined in '{origin}': node is already first."
                    );
                }
                return Ok(());
            }
            0
        } else {
            let target_key = PathSegment::parse(target)?.key();
            if target_key == key {
                return Err(invalid("a node cannot be ordered before itself"));
            }
            let Some(target_position) = siblings.get_index_of(&target_key) else {
                return Err(invalid("no such sibling"));
            };
            if position + 1 == target_position {
                if !created {
                    warn!(
                        "Unnecessary orderBefore: '{target}' for node '{path}', defined in '{origin}': node is already ordered before '{target}'."
                    );
                }
                return Ok(());
            }
            if position < target_position {
                target_position - 1
            } else {
                target_position
            }
        };

        self.nodes[parent].children.move_index(position, new_position);
        Ok(())
    }

    fn set_ignore_reordered_children(
        &mut self,
        id: NodeId,
        ignore: bool,
        origin: &Arc<SourceLocation>,
    ) {
        let path = self.path(id);
        let node = &mut self.nodes[id];
        match node.ignore_reordered_children {
            Some(previous) if previous == ignore => warn!(
                "Redundant '.meta:ignore-reordered-children: {ignore}' for node '{path}', defined in '{origin}'."
            ),
            None if !ignore => warn!(
                "Redundant '.meta:ignore-reordered-children: false' for node '{path}', defined in '{origin}'; it is the default."
            ),
            Some(previous) => {
                warn!(
                    "Overriding '.meta:ignore-reordered-children' for node '{path}' from '{previous}' to '{ignore}', defined in '{origin}'."
                );
                node.ignore_reordered_children = Some(ignore);
            }
            None => node.ignore_reordered_children = Some(ignore),
        }
    }

    fn merge_property(
        &mut self,
        id: NodeId,
        def: &DefinitionProperty,
        origin: &Arc<SourceLocation>,
    ) -> Result<()> {
        let name = def.name();
        let path = self.path(id).property(name);
        let node = &mut self.nodes[id];

        match def.category() {
            Some(category) if !category.is_config() => {
                node.properties.shift_remove(name);
                node.property_categories.insert(name.to_string(), category);
                return Ok(());
            }
            Some(_) => {
                node.property_categories.shift_remove(name);
                if !def.has_value() {
                    return Ok(());
                }
            }
            None if node.property_categories.contains_key(name) => {
                warn!(
                    "Trying to modify non-configuration property '{path}', defined in '{origin}'. Skipping."
                );
                return Ok(());
            }
            None => {}
        }

        if def.operation() == PropertyOperation::Add && def.property_type() == PropertyType::Single {
            return Err(Error::Validation {
                field: path,
                message: format!("{origin}: operation 'add' is only supported on list properties"),
            });
        }

        if def.operation() == PropertyOperation::Delete {
            if node.properties.shift_remove(name).is_none() {
                warn!("Trying to delete property '{path}' that does not exist, defined in '{origin}'.");
            }
            return Ok(());
        }

        let Some(existing) = node.properties.get_mut(name) else {
            let mut property = ConfigurationProperty::new(
                name,
                def.property_type(),
                def.value_type(),
                def.values().to_vec(),
            );
            property.defining_sources.push(Arc::clone(origin));
            node.properties.insert(name.to_string(), property);
            return Ok(());
        };

        match def.operation() {
            PropertyOperation::Override => {
                existing.property_type = def.property_type();
                existing.value_type = def.value_type();
                existing.values = def.values().to_vec();
            }
            PropertyOperation::Add => {
                check_types(existing, def, &path, origin)?;
                existing.values.extend(def.values().iter().cloned());
            }
            PropertyOperation::Replace => {
                check_types(existing, def, &path, origin)?;
                if !replace_values(existing, def, &path, origin)? {
                    return Ok(());
                }
            }
            PropertyOperation::Delete => return Ok(()),
        }
        existing.defining_sources.push(Arc::clone(origin));
        Ok(())
    }

    fn materialize(&mut self, id: NodeId, path: NodePath) -> ConfigurationNode {
        let node = &mut self.nodes[id];
        let children = mem::take(&mut node.children);
        let mut materialized = ConfigurationNode {
            segment: node.segment.clone(),
            path: path.clone(),
            category: node.category,
            residual_child_node_category: node.residual_child_node_category,
            residual_child_property_category: node.residual_child_property_category,
            ignore_reordered_children: node.ignore_reordered_children,
            property_categories: mem::take(&mut node.property_categories),
            properties: mem::take(&mut node.properties),
            children: IndexMap::with_capacity(children.len()),
            defining_sources: mem::take(&mut node.defining_sources),
        };
        for (key, child) in children {
            let child_path = match &self.nodes[child].segment {
                Some(segment) => path.child(segment.clone()),
                None => path.clone(),
            };
            let child_node = self.materialize(child, child_path);
            materialized.children.insert(key, child_node);
        }
        materialized
    }
}

fn check_types(
    existing: &ConfigurationProperty,
    def: &DefinitionProperty,
    path: &str,
    origin: &Arc<SourceLocation>,
) -> Result<()> {
    if existing.property_type != def.property_type() {
        return Err(Error::PropertyTypeConflict {
            path: path.to_string(),
            existing: existing.property_type.to_string(),
            requested: def.property_type().to_string(),
            origin: origin.to_string(),
        });
    }
    if existing.value_type != def.value_type() {
        return Err(Error::PropertyValueTypeConflict {
            path: path.to_string(),
            existing: existing.value_type.to_string(),
            requested: def.value_type().to_string(),
            origin: origin.to_string(),
        });
    }
    Ok(())
}

/// Apply a guarded replace; returns whether the property changed.
fn replace_values(
    existing: &mut ConfigurationProperty,
    def: &DefinitionProperty,
    path: &str,
    origin: &Arc<SourceLocation>,
) -> Result<bool> {
    let equivalent = values_equivalent(&existing.values, def.values());
    let unguarded = |details: String| Error::UnguardedValueChange {
        path: path.to_string(),
        origin: origin.to_string(),
        details,
    };

    if def.name() == JCR_PRIMARY_TYPE {
        if equivalent {
            return Ok(false);
        }
        return Err(unguarded(format!(
            "cannot change primary type from {} to {}",
            describe_values(&existing.values),
            describe_values(def.values())
        )));
    }
    if def.name() == JCR_MIXIN_TYPES && !values_superset(def.values(), &existing.values) {
        return Err(unguarded(format!(
            "mixin types {} do not include all existing mixin types {}",
            describe_values(def.values()),
            describe_values(&existing.values)
        )));
    }

    if equivalent {
        let new_resource_from_other_origin = def.values().iter().any(Value::is_resource)
            && existing
                .defining_sources
                .last()
                .map_or(true, |last| **last != **origin);
        if !new_resource_from_other_origin {
            warn!(
                "Property '{path}' defined in '{origin}' specifies value equivalent to existing property, defined in '{}'.",
                describe_origins(&existing.defining_sources)
            );
            return Ok(false);
        }
    }

    existing.values = def.values().to_vec();
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceKind;

    fn origin(path: &str) -> Arc<SourceLocation> {
        Arc::new(SourceLocation::new("g/p/m", path, SourceKind::Config))
    }

    fn push(builder: &mut ConfigurationTreeBuilder, path: &str, node: DefinitionNode) -> Result<()> {
        let definition = TreeDefinition::new(origin("config.yaml"), NodePath::parse(path).unwrap(), node);
        builder.push(&definition)
    }

    fn child_names(node: &ConfigurationNode) -> Vec<String> {
        node.children().map(|c| c.path().last().unwrap().to_string()).collect()
    }

    #[test]
    fn test_root_carries_builtin_properties() {
        let root = ConfigurationTreeBuilder::new().build();
        assert!(root.is_root());
        let primary = root.property(JCR_PRIMARY_TYPE).unwrap();
        assert_eq!(primary.value(), Some(&Value::from(ROOT_PRIMARY_TYPE)));
        let mixins = root.property(JCR_MIXIN_TYPES).unwrap();
        assert_eq!(mixins.property_type(), PropertyType::List);
        assert!(mixins.values().is_empty());
    }

    #[test]
    fn test_nested_children_created_in_order() {
        let mut builder = ConfigurationTreeBuilder::new();
        push(
            &mut builder,
            "/a",
            DefinitionNode::new()
                .with_node(PathSegment::new("c"), DefinitionNode::new())
                .with_node(PathSegment::new("b"), DefinitionNode::new()),
        )
        .unwrap();
        let root = builder.build();
        let a = root.child("a").unwrap();
        assert_eq!(child_names(a), vec!["c", "b"]);
        assert_eq!(a.child("b").unwrap().path().to_string(), "/a/b");
    }

    #[test]
    fn test_unreachable_root_reports_closest_ancestor() {
        let mut builder = ConfigurationTreeBuilder::new();
        push(&mut builder, "/a", DefinitionNode::new()).unwrap();
        let err = push(&mut builder, "/a/b/c", DefinitionNode::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::UnreachableNode { ref closest_ancestor, .. } if closest_ancestor == "/a"
        ));
    }

    #[test]
    fn test_sns_requires_previous_sibling() {
        let mut builder = ConfigurationTreeBuilder::new();
        push(&mut builder, "/a", DefinitionNode::new()).unwrap();
        let err = push(&mut builder, "/a/sns[2]", DefinitionNode::new()).unwrap_err();
        assert!(matches!(err, Error::MissingSibling { ref sibling, .. } if sibling == "sns[1]"));
    }

    #[test]
    fn test_delete_compacts_sns_indices() {
        let mut builder = ConfigurationTreeBuilder::new();
        push(
            &mut builder,
            "/a",
            DefinitionNode::new()
                .with_node(
                    PathSegment::new("sns"),
                    DefinitionNode::new().with_property(DefinitionProperty::string("p", "one")),
                )
                .with_node(
                    PathSegment::indexed("sns", 2),
                    DefinitionNode::new().with_property(DefinitionProperty::string("p", "two")),
                )
                .with_node(
                    PathSegment::indexed("sns", 3),
                    DefinitionNode::new().with_property(DefinitionProperty::string("p", "three")),
                ),
        )
        .unwrap();
        push(&mut builder, "/a/sns[2]", DefinitionNode::deleted()).unwrap();

        let root = builder.build();
        let a = root.child("a").unwrap();
        assert_eq!(child_names(a), vec!["sns", "sns[2]"]);
        let second = a.child("sns[2]").unwrap();
        assert_eq!(second.property("p").unwrap().value(), Some(&Value::from("three")));
        assert_eq!(second.sns_index(), 2);
    }

    #[test]
    fn test_order_before_moves_node() {
        let mut builder = ConfigurationTreeBuilder::new();
        push(
            &mut builder,
            "/a",
            DefinitionNode::new()
                .with_node(PathSegment::new("b"), DefinitionNode::new())
                .with_node(PathSegment::new("c"), DefinitionNode::new())
                .with_node(PathSegment::new("d"), DefinitionNode::new()),
        )
        .unwrap();
        push(&mut builder, "/a/d", DefinitionNode::new().with_order_before("b")).unwrap();
        push(&mut builder, "/a/b", DefinitionNode::new().with_order_before("")).unwrap();
        push(&mut builder, "/a/d", DefinitionNode::new().with_order_before("")).unwrap();

        let root = builder.build();
        assert_eq!(child_names(root.child("a").unwrap()), vec!["d", "b", "c"]);
    }

    #[test]
    fn test_order_before_moving_forward() {
        let mut builder = ConfigurationTreeBuilder::new();
        push(
            &mut builder,
            "/a",
            DefinitionNode::new()
                .with_node(PathSegment::new("b"), DefinitionNode::new())
                .with_node(PathSegment::new("c"), DefinitionNode::new())
                .with_node(PathSegment::new("d"), DefinitionNode::new()),
        )
        .unwrap();
        push(&mut builder, "/a/b", DefinitionNode::new().with_order_before("d")).unwrap();

        let root = builder.build();
        assert_eq!(child_names(root.child("a").unwrap()), vec!["c", "b", "d"]);
    }

    #[test]
    fn test_order_before_unknown_sibling_fails() {
        let mut builder = ConfigurationTreeBuilder::new();
        push(&mut builder, "/a", DefinitionNode::new()).unwrap();
        let err = push(&mut builder, "/a", DefinitionNode::new().with_order_before("x")).unwrap_err();
        assert!(matches!(err, Error::InvalidOrderBefore { .. }));

        let err = push(&mut builder, "/a", DefinitionNode::new().with_order_before("a")).unwrap_err();
        assert!(err.to_string().contains("before itself"));
    }

    #[test]
    fn test_runtime_node_becomes_placeholder() {
        let mut builder = ConfigurationTreeBuilder::new();
        push(
            &mut builder,
            "/a",
            DefinitionNode::new().with_node(PathSegment::new("b"), DefinitionNode::new()),
        )
        .unwrap();
        push(&mut builder, "/a", DefinitionNode::new().with_category(Category::Runtime)).unwrap();
        push(&mut builder, "/a/b", DefinitionNode::new()).unwrap();
        push(
            &mut builder,
            "/a",
            DefinitionNode::new().with_property(DefinitionProperty::string("p", "v")),
        )
        .unwrap();

        let root = builder.build();
        let a = root.child("a").unwrap();
        assert_eq!(a.category(), Category::Runtime);
        assert_eq!(a.children().count(), 0);
        assert!(a.properties().is_empty());
    }

    #[test]
    fn test_property_category_gates_later_changes() {
        let mut builder = ConfigurationTreeBuilder::new();
        push(
            &mut builder,
            "/a",
            DefinitionNode::new().with_property(DefinitionProperty::string("p", "v")),
        )
        .unwrap();
        push(
            &mut builder,
            "/a",
            DefinitionNode::new()
                .with_property(DefinitionProperty::category_only("p", Category::Content)),
        )
        .unwrap();
        push(
            &mut builder,
            "/a",
            DefinitionNode::new().with_property(DefinitionProperty::string("p", "w")),
        )
        .unwrap();

        let root = builder.build();
        let a = root.child("a").unwrap();
        assert!(a.property("p").is_none());
        assert_eq!(a.child_property_category("p"), Category::Content);
    }

    #[test]
    fn test_override_replaces_type() {
        let mut builder = ConfigurationTreeBuilder::new();
        push(
            &mut builder,
            "/a",
            DefinitionNode::new().with_property(DefinitionProperty::string("p", "v")),
        )
        .unwrap();
        push(
            &mut builder,
            "/a",
            DefinitionNode::new().with_property(
                DefinitionProperty::list("p", ValueType::Long, vec![Value::from(1), Value::from(2)])
                    .with_operation(PropertyOperation::Override),
            ),
        )
        .unwrap();

        let root = builder.build();
        let p = root.child("a").unwrap().property("p").unwrap();
        assert_eq!(p.property_type(), PropertyType::List);
        assert_eq!(p.value_type(), ValueType::Long);
        assert_eq!(p.defining_sources().len(), 2);
    }

    #[test]
    fn test_add_on_single_rejected() {
        let mut builder = ConfigurationTreeBuilder::new();
        let err = push(
            &mut builder,
            "/a",
            DefinitionNode::new().with_property(
                DefinitionProperty::string("p", "v").with_operation(PropertyOperation::Add),
            ),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_deleting_root_rejected() {
        let mut builder = ConfigurationTreeBuilder::new();
        assert!(push(&mut builder, "/", DefinitionNode::deleted()).is_err());
    }
}
