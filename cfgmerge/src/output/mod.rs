//! Output formatting for assembled models.
//!
//! A model renders either as its configuration tree (or a subtree) or as a
//! [`ModelSummary`] of build order and declarations. YAML and JSON serialize
//! the same structures; text is meant for terminals.

mod formatters;
mod summary;

use crate::model::ConfigurationNode;
use crate::Result;

pub use crate::config::OutputFormat;
pub use formatters::{JsonFormatter, TextFormatter, YamlFormatter};
pub use summary::{GroupSummary, ModelSummary, ModuleSummary, NamespaceSummary, ProjectSummary};

/// Trait for rendering models in one output format.
pub trait OutputFormatter {
    /// Render a configuration node and everything below it.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_tree(&self, node: &ConfigurationNode) -> Result<String>;

    /// Render a model summary.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_summary(&self, summary: &ModelSummary) -> Result<String>;
}

impl OutputFormat {
    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Yaml => Box::new(YamlFormatter),
            Self::Json => Box::new(JsonFormatter),
            Self::Text => Box::new(TextFormatter),
        }
    }
}
