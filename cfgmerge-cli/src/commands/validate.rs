//! Command to validate that module directories assemble cleanly.

use crate::error::CliError;
use crate::utils::{self, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Check that the modules assemble without errors.
///
/// Warnings are reported but do not fail validation.
#[derive(Args)]
pub struct ValidateCommand {
    /// Module directories (each containing a module.yaml)
    #[arg(value_name = "MODULE_DIR")]
    pub modules: Vec<PathBuf>,
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_settings, model) = utils::prepare(global, &self.modules)?;

        if !global.quiet {
            println!("Model is valid ({} module(s))", model.modules().count());
        }
        Ok(())
    }
}
