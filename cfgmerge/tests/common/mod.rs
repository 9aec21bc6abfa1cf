//! Common test utilities for integration tests.
//!
//! Fixture helpers for building definitions, groups and on-disk module
//! directories.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cfgmerge::model::{SourceKind, SourceLocation, TreeDefinition};
use cfgmerge::tree::ConfigurationTreeBuilder;
use cfgmerge::{ConfigurationNode, DefinitionNode, Group, NodePath, Result};

/// Origin for a config source of module `g/p/m`.
#[allow(dead_code)]
pub fn origin(path: &str) -> Arc<SourceLocation> {
    Arc::new(SourceLocation::new("g/p/m", path, SourceKind::Config))
}

/// A config definition rooted at `path` from `source`.
#[allow(dead_code)]
pub fn definition(source: &str, path: &str, node: DefinitionNode) -> TreeDefinition {
    TreeDefinition::new(origin(source), NodePath::parse(path).unwrap(), node)
}

/// Push definitions in order and build the tree.
#[allow(dead_code)]
pub fn build_tree(definitions: &[TreeDefinition]) -> Result<ConfigurationNode> {
    let mut builder = ConfigurationTreeBuilder::new();
    for definition in definitions {
        builder.push(definition)?;
    }
    Ok(builder.build())
}

/// Names of a node's children in order, with explicit SNS indices.
#[allow(dead_code)]
pub fn child_names(node: &ConfigurationNode) -> Vec<String> {
    node.children()
        .map(|c| c.path().last().unwrap().to_string())
        .collect()
}

/// A group holding one project with one module that declares `after`.
#[allow(dead_code)]
pub fn group_with_module(group: &str, project: &str, module: &str, after: &[&str]) -> Group {
    let mut g = Group::new(group);
    g.add_project(project)
        .add_module(module)
        .unwrap()
        .add_after(after.iter().copied());
    g
}

/// Builder for module directories on disk.
///
/// # Examples
///
/// ```no_run
/// # use common::ModuleDirFixture;
/// let dir = ModuleDirFixture::new(root, "core")
///     .with_descriptor("group: g\nproject: p\nmodule: core\n")
///     .with_config("main.yaml", "definitions:\n  config:\n    /a: {}\n")
///     .write();
/// ```
#[allow(dead_code)]
pub struct ModuleDirFixture {
    dir: PathBuf,
    descriptor: String,
    files: Vec<(String, String)>,
}

#[allow(dead_code)]
impl ModuleDirFixture {
    /// Start a module directory `name` below `root`.
    pub fn new(root: &Path, name: &str) -> Self {
        Self {
            dir: root.join(name),
            descriptor: format!("group: g\nproject: p\nmodule: {name}\n"),
            files: Vec::new(),
        }
    }

    /// Replace the generated `module.yaml`.
    pub fn with_descriptor(mut self, descriptor: &str) -> Self {
        self.descriptor = descriptor.to_string();
        self
    }

    /// Add a file below `config/`.
    pub fn with_config(self, relative: &str, contents: &str) -> Self {
        self.with_file(&format!("config/{relative}"), contents)
    }

    /// Add a file below `content/`.
    pub fn with_content(self, relative: &str, contents: &str) -> Self {
        self.with_file(&format!("content/{relative}"), contents)
    }

    /// Add any file relative to the module directory.
    pub fn with_file(mut self, relative: &str, contents: &str) -> Self {
        self.files.push((relative.to_string(), contents.to_string()));
        self
    }

    /// Write everything and return the module directory.
    pub fn write(self) -> PathBuf {
        fs::create_dir_all(&self.dir).unwrap();
        fs::write(self.dir.join("module.yaml"), &self.descriptor).unwrap();
        for (relative, contents) in &self.files {
            let path = self.dir.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        self.dir
    }
}
