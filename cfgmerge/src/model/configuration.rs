//! Assembly of the full configuration model.

use log::debug;

use crate::error::{Error, Result};
use crate::model::definition::{NamespaceDefinition, TreeDefinition, WebFileBundleDefinition};
use crate::model::module::{Group, Module};
use crate::model::tree::{ConfigurationNode, ConfigurationProperty};
use crate::model::Orderable;
use crate::path::NodePath;
use crate::sort::{DefinitionSorter, OrderableByNameListSorter};
use crate::tree::ConfigurationTreeBuilder;

/// Accumulates groups and assembles them into a [`ConfigurationModel`].
///
/// Groups and projects contributed more than once merge by name; modules
/// never merge.
///
/// # Examples
///
/// ```
/// use cfgmerge::model::{ConfigurationModelBuilder, DefinitionNode, DefinitionProperty, Group};
/// use cfgmerge::path::NodePath;
///
/// let mut group = Group::new("core");
/// group
///     .add_project("platform")
///     .add_module("repository")
///     .unwrap()
///     .add_config_source("config.yaml")
///     .add_config_definition(
///         NodePath::parse("/a").unwrap(),
///         DefinitionNode::new().with_property(DefinitionProperty::string("p1", "bla1")),
///     );
///
/// let mut builder = ConfigurationModelBuilder::new();
/// builder.add_group(group).unwrap();
/// let model = builder.build().unwrap();
///
/// let property = model.resolve_property("/a/p1").unwrap();
/// assert_eq!(property.values()[0].to_string(), "bla1");
/// assert!(model.resolve_node("/missing").is_none());
/// ```
#[derive(Debug, Default)]
pub struct ConfigurationModelBuilder {
    groups: Vec<Group>,
}

impl ConfigurationModelBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group, merging it with a previously added group of that name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModuleMergeConflict`] if a merged project ends up with
    /// two modules of the same name.
    pub fn add_group(&mut self, group: Group) -> Result<&mut Self> {
        match self.groups.iter_mut().find(|g| g.name() == group.name()) {
            Some(existing) => existing.merge(group)?,
            None => self.groups.push(group),
        }
        Ok(self)
    }

    /// Sort the hierarchy, merge every config definition and collect the
    /// side lists.
    ///
    /// # Errors
    ///
    /// Returns the first ordering, definition, namespace, bundle or merge
    /// error encountered.
    pub fn build(self) -> Result<ConfigurationModel> {
        let mut groups = self.groups;
        OrderableByNameListSorter::new("group").sort(&mut groups)?;
        let project_sorter = OrderableByNameListSorter::new("project");
        let module_sorter = OrderableByNameListSorter::new("module");
        for group in &mut groups {
            project_sorter.sort(group.projects_mut())?;
            for project in group.projects_mut() {
                module_sorter.sort(project.modules_mut())?;
            }
        }

        let mut tree = ConfigurationTreeBuilder::new();
        let mut namespaces: Vec<NamespaceDefinition> = Vec::new();
        let mut web_file_bundles: Vec<WebFileBundleDefinition> = Vec::new();
        let mut content_definitions: Vec<TreeDefinition> = Vec::new();
        let definition_sorter = DefinitionSorter::new();

        for module in groups.iter().flat_map(|g| g.modules()) {
            debug!("Building module '{}'", module.qualified_name());
            let sorted = definition_sorter.sort(module)?;

            for namespace in sorted.namespaces {
                match namespaces.iter().find(|n| n.prefix() == namespace.prefix()) {
                    Some(existing) if existing.uri() == namespace.uri() => {
                        debug!(
                            "Namespace '{}' from {} already registered",
                            namespace.prefix(),
                            namespace.origin()
                        );
                    }
                    Some(existing) => {
                        return Err(Error::NamespaceConflict {
                            prefix: namespace.prefix().to_string(),
                            existing_uri: existing.uri().to_string(),
                            first: existing.origin().to_string(),
                            uri: namespace.uri().to_string(),
                            second: namespace.origin().to_string(),
                        });
                    }
                    None => namespaces.push(namespace.clone()),
                }
            }

            for bundle in sorted.web_file_bundles {
                if let Some(existing) = web_file_bundles.iter().find(|b| b.name() == bundle.name()) {
                    return Err(Error::DuplicateBundleName {
                        name: bundle.name().to_string(),
                        first: existing.origin().to_string(),
                        second: bundle.origin().to_string(),
                    });
                }
                web_file_bundles.push(bundle.clone());
            }

            for definition in sorted.config {
                tree.push(definition)?;
            }
            content_definitions.extend(sorted.content.into_iter().cloned());
        }

        Ok(ConfigurationModel {
            groups,
            root: tree.build(),
            namespaces,
            web_file_bundles,
            content_definitions,
        })
    }
}

/// The immutable result of a build.
#[derive(Debug, Clone)]
pub struct ConfigurationModel {
    groups: Vec<Group>,
    root: ConfigurationNode,
    namespaces: Vec<NamespaceDefinition>,
    web_file_bundles: Vec<WebFileBundleDefinition>,
    content_definitions: Vec<TreeDefinition>,
}

impl ConfigurationModel {
    /// Groups in build order, with projects and modules sorted.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Modules in build order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.groups.iter().flat_map(|g| g.modules())
    }

    /// The root of the configuration tree.
    #[must_use]
    pub fn root(&self) -> &ConfigurationNode {
        &self.root
    }

    /// Find a node by absolute path.
    #[must_use]
    pub fn resolve_node(&self, path: &str) -> Option<&ConfigurationNode> {
        let path = NodePath::parse(path).ok()?;
        self.root.resolve(&path)
    }

    /// Find a property by absolute path, e.g. `/a/b/property1`.
    #[must_use]
    pub fn resolve_property(&self, path: &str) -> Option<&ConfigurationProperty> {
        let (parent, name) = path.rsplit_once('/')?;
        if name.is_empty() {
            return None;
        }
        let parent = if parent.is_empty() { "/" } else { parent };
        self.resolve_node(parent)?.property(name)
    }

    /// Registered namespaces in registration order.
    #[must_use]
    pub fn namespaces(&self) -> &[NamespaceDefinition] {
        &self.namespaces
    }

    /// Declared web file bundles in declaration order.
    #[must_use]
    pub fn web_file_bundles(&self) -> &[WebFileBundleDefinition] {
        &self.web_file_bundles
    }

    /// Content definitions, sorted per module, in module order.
    #[must_use]
    pub fn content_definitions(&self) -> &[TreeDefinition] {
        &self.content_definitions
    }
}
