//! Serializable overview of an assembled model.

use serde::Serialize;

use crate::model::{ConfigurationModel, Orderable};

/// Build order and declarations of a model, without the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    /// Groups in build order.
    pub groups: Vec<GroupSummary>,
    /// Namespace declarations in registration order.
    pub namespaces: Vec<NamespaceSummary>,
    /// Web-file bundle names in registration order.
    pub web_file_bundles: Vec<String>,
}

/// One group and its projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    /// Group name.
    pub name: String,
    /// Projects in build order.
    pub projects: Vec<ProjectSummary>,
}

/// One project and its modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    /// Project name.
    pub name: String,
    /// Modules in build order.
    pub modules: Vec<ModuleSummary>,
}

/// One module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    /// Module name.
    pub name: String,
    /// Where the module was loaded from, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Number of sources in the module.
    pub sources: usize,
}

/// A namespace binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceSummary {
    /// Namespace prefix.
    pub prefix: String,
    /// Namespace URI.
    pub uri: String,
}

impl From<&ConfigurationModel> for ModelSummary {
    fn from(model: &ConfigurationModel) -> Self {
        let groups = model
            .groups()
            .iter()
            .map(|group| GroupSummary {
                name: group.name().to_string(),
                projects: group
                    .projects()
                    .iter()
                    .map(|project| ProjectSummary {
                        name: project.name().to_string(),
                        modules: project
                            .modules()
                            .iter()
                            .map(|module| ModuleSummary {
                                name: module.name().to_string(),
                                origin: module.origin().map(str::to_string),
                                sources: module.sources().len(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            groups,
            namespaces: model
                .namespaces()
                .iter()
                .map(|ns| NamespaceSummary {
                    prefix: ns.prefix().to_string(),
                    uri: ns.uri().to_string(),
                })
                .collect(),
            web_file_bundles: model
                .web_file_bundles()
                .iter()
                .map(|bundle| bundle.name().to_string())
                .collect(),
        }
    }
}
