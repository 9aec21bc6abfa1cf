#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # cfgmerge
//!
//! A library for assembling one hierarchical configuration tree from many
//! partially ordered module definitions.
//!
//! Modules live in projects, projects in groups; each level declares which
//! siblings it must come `after`. The model builder sorts that hierarchy,
//! sorts each module's definitions parent-first, and folds every config
//! definition into a single tree, reporting conflicts as errors and
//! questionable overrides as `log` warnings.
//!
//! ## Core Types
//!
//! - [`Group`], [`Project`], [`Module`] and [`Source`]: the input hierarchy
//! - [`ConfigurationModelBuilder`] and [`ConfigurationModel`]: assembly and result
//! - [`ConfigurationNode`] and [`ConfigurationProperty`]: the merged tree
//! - [`NodePath`] and [`PathSegment`]: addressing nodes, with SNS indices
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use cfgmerge::{ConfigurationModelBuilder, DefinitionNode, DefinitionProperty, Group, NodePath};
//!
//! let mut group = Group::new("base");
//! group
//!     .add_project("site")
//!     .add_module("core")
//!     .unwrap()
//!     .add_config_source("main.yaml")
//!     .add_config_definition(
//!         NodePath::parse("/settings").unwrap(),
//!         DefinitionNode::new().with_property(DefinitionProperty::string("title", "Home")),
//!     );
//!
//! let mut builder = ConfigurationModelBuilder::new();
//! builder.add_group(group).unwrap();
//! let model = builder.build().unwrap();
//!
//! let title = model.resolve_property("/settings/title").unwrap();
//! assert_eq!(title.value().unwrap().as_str(), Some("Home"));
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod model;
pub mod output;
pub mod path;
pub mod sort;
pub mod tree;

// Re-export key types at crate root for convenience
pub use config::{Settings, SettingsBuilder};
pub use error::{Error, Result};
pub use loader::ModuleLoader;
pub use logging::{init_logger, LogLevel, Logger};
pub use model::{
    Category, ConfigurationModel, ConfigurationModelBuilder, ConfigurationNode,
    ConfigurationProperty, DefinitionNode, DefinitionProperty, Group, Module, Project, Source,
    SourceLocation, Value, ValueType,
};
pub use output::{ModelSummary, OutputFormat, OutputFormatter};
pub use path::{NodePath, PathRelationship, PathSegment};
pub use sort::{DefinitionSorter, OrderableByNameListSorter};
pub use tree::ConfigurationTreeBuilder;
