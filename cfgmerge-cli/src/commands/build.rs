//! Build command implementation.

use crate::error::CliError;
use crate::utils::{self, GlobalOptions};
use cfgmerge::NodePath;
use clap::Args;
use std::path::PathBuf;

/// Render the merged configuration tree.
#[derive(Args)]
pub struct BuildCommand {
    /// Module directories (each containing a module.yaml)
    #[arg(value_name = "MODULE_DIR")]
    pub modules: Vec<PathBuf>,

    /// Only render the subtree at this node path
    #[arg(long, value_name = "NODE_PATH")]
    pub path: Option<String>,
}

impl BuildCommand {
    /// Execute the build command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Reject malformed paths before doing any work
        if let Some(ref path) = self.path {
            NodePath::parse(path).map_err(|e| CliError::InvalidArguments(e.to_string()))?;
        }

        let (settings, model) = utils::prepare(global, &self.modules)?;

        let node = match self.path {
            Some(ref path) => model
                .resolve_node(path)
                .ok_or_else(|| CliError::NotFound(path.clone()))?,
            None => model.root(),
        };

        let formatter = utils::output_format(global, &settings).create_formatter();
        println!("{}", formatter.format_tree(node)?);
        Ok(())
    }
}
