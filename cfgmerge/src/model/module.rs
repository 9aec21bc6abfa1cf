//! The group / project / module hierarchy.
//!
//! Groups contain projects contain modules. Groups and projects are
//! identified by name and merge when contributed twice; modules never merge.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::model::orderable::Orderable;
use crate::model::source::{Source, SourceKind, SourceLocation};

/// A module: the unit that owns sources.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    name: String,
    group: String,
    project: String,
    after: BTreeSet<String>,
    origin: Option<String>,
    sources: Vec<Source>,
}

impl Module {
    fn new(group: &str, project: &str, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.to_string(),
            project: project.to_string(),
            after: BTreeSet::new(),
            origin: None,
            sources: Vec::new(),
        }
    }

    /// The qualified `group/project/module` name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}/{}/{}", self.group, self.project, self.name)
    }

    /// Name of the owning group.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Name of the owning project.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Declare modules this module must come after.
    pub fn add_after<I, S>(&mut self, after: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.after.extend(after.into_iter().map(Into::into));
        self
    }

    /// Record where the module was loaded from, for diagnostics.
    pub fn set_origin(&mut self, origin: impl Into<String>) -> &mut Self {
        self.origin = Some(origin.into());
        self
    }

    /// Where the module was loaded from, if known.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Add a configuration source.
    pub fn add_config_source(&mut self, path: impl Into<String>) -> &mut Source {
        self.add_source(path, SourceKind::Config)
    }

    /// Add a content source.
    pub fn add_content_source(&mut self, path: impl Into<String>) -> &mut Source {
        self.add_source(path, SourceKind::Content)
    }

    fn add_source(&mut self, path: impl Into<String>, kind: SourceKind) -> &mut Source {
        let location = SourceLocation::new(self.qualified_name(), path, kind);
        let index = self.sources.len();
        self.sources.push(Source::new(location));
        &mut self.sources[index]
    }

    /// Sources in load order.
    #[must_use]
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    fn describe(&self) -> String {
        match &self.origin {
            Some(origin) => format!("{} ({origin})", self.qualified_name()),
            None => self.qualified_name(),
        }
    }
}

impl Orderable for Module {
    fn name(&self) -> &str {
        &self.name
    }

    fn after(&self) -> &BTreeSet<String> {
        &self.after
    }
}

/// A project: a named collection of modules within a group.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    name: String,
    group: String,
    after: BTreeSet<String>,
    modules: Vec<Module>,
}

impl Project {
    fn new(group: &str, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.to_string(),
            after: BTreeSet::new(),
            modules: Vec::new(),
        }
    }

    /// Name of the owning group.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Declare projects this project must come after.
    pub fn add_after<I, S>(&mut self, after: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.after.extend(after.into_iter().map(Into::into));
        self
    }

    /// Add a module.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModuleMergeConflict`] if the project already has a
    /// module with that name.
    pub fn add_module(&mut self, name: impl Into<String>) -> Result<&mut Module> {
        let module = Module::new(&self.group, &self.name, name);
        self.insert_module(module)
    }

    fn insert_module(&mut self, module: Module) -> Result<&mut Module> {
        if let Some(existing) = self.modules.iter().find(|m| m.name == module.name) {
            return Err(Error::ModuleMergeConflict {
                module: module.qualified_name(),
                first: existing.describe(),
                second: module.describe(),
            });
        }
        let index = self.modules.len();
        self.modules.push(module);
        Ok(&mut self.modules[index])
    }

    /// Modules of this project.
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Look up a module by name.
    #[must_use]
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub(crate) fn modules_mut(&mut self) -> &mut Vec<Module> {
        &mut self.modules
    }

    /// Fold another contribution of the same project into this one.
    pub(crate) fn merge(&mut self, other: Project) -> Result<()> {
        self.after.extend(other.after);
        for module in other.modules {
            self.insert_module(module)?;
        }
        Ok(())
    }
}

impl Orderable for Project {
    fn name(&self) -> &str {
        &self.name
    }

    fn after(&self) -> &BTreeSet<String> {
        &self.after
    }
}

/// A group: the top level of the hierarchy.
///
/// # Examples
///
/// ```
/// use cfgmerge::model::{DefinitionNode, DefinitionProperty, Group, Orderable};
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
/// assert_eq!(group.name(), "core");
/// let module = group.project("platform").unwrap().module("repository").unwrap();
/// assert_eq!(module.qualified_name(), "core/platform/repository");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    name: String,
    after: BTreeSet<String>,
    projects: Vec<Project>,
}

impl Group {
    /// Create an empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            after: BTreeSet::new(),
            projects: Vec::new(),
        }
    }

    /// Declare groups this group must come after.
    pub fn add_after<I, S>(&mut self, after: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.after.extend(after.into_iter().map(Into::into));
        self
    }

    /// Builder form of [`Group::add_after`].
    #[must_use]
    pub fn with_after<I, S>(mut self, after: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_after(after);
        self
    }

    /// Get or create the project with the given name.
    pub fn add_project(&mut self, name: impl Into<String>) -> &mut Project {
        let name = name.into();
        let index = match self.projects.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                self.projects.push(Project::new(&self.name, name));
                self.projects.len() - 1
            }
        };
        &mut self.projects[index]
    }

    /// Projects of this group.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Look up a project by name.
    #[must_use]
    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    pub(crate) fn projects_mut(&mut self) -> &mut Vec<Project> {
        &mut self.projects
    }

    /// Fold another contribution of the same group into this one.
    ///
    /// Projects with equal names merge; modules never do.
    pub(crate) fn merge(&mut self, other: Group) -> Result<()> {
        self.after.extend(other.after);
        for project in other.projects {
            match self.projects.iter_mut().find(|p| p.name == project.name) {
                Some(existing) => existing.merge(project)?,
                None => self.projects.push(project),
            }
        }
        Ok(())
    }

    /// All modules in hierarchy order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.projects.iter().flat_map(|p| p.modules.iter())
    }
}

impl Orderable for Group {
    fn name(&self) -> &str {
        &self.name
    }

    fn after(&self) -> &BTreeSet<String> {
        &self.after
    }
}
