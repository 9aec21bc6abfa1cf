//! The configuration object model.
//!
//! Inputs (groups, projects, modules, sources and their definitions) and the
//! output (the merged [`ConfigurationNode`] tree inside a
//! [`ConfigurationModel`]).

mod configuration;
mod definition;
mod module;
mod orderable;
mod source;
mod tree;
mod value;

pub use configuration::{ConfigurationModel, ConfigurationModelBuilder};
pub use definition::{
    Definition, DefinitionNode, DefinitionProperty, NamespaceDefinition, TreeDefinition,
    WebFileBundleDefinition,
};
pub use module::{Group, Module, Project};
pub use orderable::{NamedEntry, Orderable};
pub use source::{Source, SourceKind, SourceLocation};
pub use tree::{ConfigurationNode, ConfigurationProperty};
pub use value::{
    values_equivalent, values_superset, Category, PropertyOperation, PropertyType, Resource,
    Value, ValueType, JCR_MIXIN_TYPES, JCR_PRIMARY_TYPE, ROOT_PRIMARY_TYPE,
};

