//! Order command implementation.

use crate::error::CliError;
use crate::utils::{self, GlobalOptions};
use cfgmerge::ModelSummary;
use clap::Args;
use std::path::PathBuf;

/// Show groups, projects and modules in build order, together with the
/// namespaces and web file bundles they declare.
#[derive(Args)]
pub struct OrderCommand {
    /// Module directories (each containing a module.yaml)
    #[arg(value_name = "MODULE_DIR")]
    pub modules: Vec<PathBuf>,
}

impl OrderCommand {
    /// Execute the order command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (settings, model) = utils::prepare(global, &self.modules)?;

        let summary = ModelSummary::from(&model);
        let formatter = utils::output_format(global, &settings).create_formatter();
        println!("{}", formatter.format_summary(&summary)?);
        Ok(())
    }
}
