//! Sources: the documents a module is assembled from.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::model::definition::{
    Definition, DefinitionNode, NamespaceDefinition, TreeDefinition, WebFileBundleDefinition,
};
use crate::path::NodePath;

/// Whether a source contributes configuration or content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A configuration source.
    Config,
    /// A content source.
    Content,
}

/// Identity of a source: its module and module-relative path.
///
/// Displays as `[group/project/module] path`, the form used in every
/// diagnostic that names an origin.
///
/// # Examples
///
/// ```
/// use cfgmerge::model::{SourceKind, SourceLocation};
///
/// let location = SourceLocation::new("g/p/m", "config/main.yaml", SourceKind::Config);
/// assert_eq!(location.to_string(), "[g/p/m] config/main.yaml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    module: String,
    path: String,
    kind: SourceKind,
}

impl SourceLocation {
    /// Create a source location.
    #[must_use]
    pub fn new(module: impl Into<String>, path: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            module: module.into(),
            path: path.into(),
            kind,
        }
    }

    /// Qualified `group/project/module` name of the owning module.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Module-relative path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Config or content.
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        self.kind
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.module, self.path)
    }
}

/// One originating document and the definitions it contributes, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    location: Arc<SourceLocation>,
    definitions: Vec<Definition>,
}

impl Source {
    /// Create an empty source.
    #[must_use]
    pub fn new(location: SourceLocation) -> Self {
        Self {
            location: Arc::new(location),
            definitions: Vec::new(),
        }
    }

    /// The source identity.
    #[must_use]
    pub fn location(&self) -> &Arc<SourceLocation> {
        &self.location
    }

    /// Module-relative path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.location.path()
    }

    /// Definitions in document order.
    #[must_use]
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    /// Append a config definition rooted at `root`.
    pub fn add_config_definition(&mut self, root: NodePath, node: DefinitionNode) -> &mut Self {
        let definition = TreeDefinition::new(Arc::clone(&self.location), root, node);
        self.definitions.push(Definition::Config(definition));
        self
    }

    /// Append a content definition rooted at `root`.
    pub fn add_content_definition(&mut self, root: NodePath, node: DefinitionNode) -> &mut Self {
        let definition = TreeDefinition::new(Arc::clone(&self.location), root, node);
        self.definitions.push(Definition::Content(definition));
        self
    }

    /// Append a namespace declaration.
    pub fn add_namespace(&mut self, prefix: impl Into<String>, uri: impl Into<String>) -> &mut Self {
        let definition = NamespaceDefinition::new(Arc::clone(&self.location), prefix, uri);
        self.definitions.push(Definition::Namespace(definition));
        self
    }

    /// Append a web file bundle declaration.
    pub fn add_web_file_bundle(&mut self, name: impl Into<String>) -> &mut Self {
        let definition = WebFileBundleDefinition::new(Arc::clone(&self.location), name);
        self.definitions.push(Definition::WebFileBundle(definition));
        self
    }

    /// Whether the source declares any namespace.
    #[must_use]
    pub fn has_namespaces(&self) -> bool {
        self.definitions
            .iter()
            .any(|d| matches!(d, Definition::Namespace(_)))
    }
}
