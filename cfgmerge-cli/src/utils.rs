//! Utility functions for CLI operations.
//!
//! This module provides the steps every command shares: loading settings,
//! deciding which module directories to read, assembling the model and
//! picking the output format.

use crate::error::CliError;
use cfgmerge::{
    ConfigurationModel, ConfigurationModelBuilder, ModuleLoader, OutputFormat, Settings,
    SettingsBuilder,
};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Output format given on the command line.
    pub format: Option<OutputFormat>,

    /// Explicit settings file.
    pub config: Option<PathBuf>,
}

/// Load layered settings.
///
/// With `--config` only that file is read; otherwise the user file and any
/// project files found from the current directory upwards are merged. The
/// environment overrides both.
pub fn load_settings(global: &GlobalOptions) -> Result<Settings, CliError> {
    let mut builder = SettingsBuilder::new();
    if let Some(ref path) = global.config {
        builder = builder.with_config_file(path);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Pick the module directories to assemble.
///
/// Directories named on the command line win over the ones listed in
/// settings.
pub fn module_dirs(args: &[PathBuf], settings: &Settings) -> Result<Vec<PathBuf>, CliError> {
    if !args.is_empty() {
        return Ok(args.to_vec());
    }

    match settings.modules {
        Some(ref modules) if !modules.is_empty() => Ok(modules.clone()),
        _ => Err(CliError::InvalidArguments(
            "no module directories given and none configured".to_string(),
        )),
    }
}

/// Load module directories and assemble them into a model.
pub fn assemble(dirs: &[PathBuf]) -> Result<ConfigurationModel, CliError> {
    let groups = ModuleLoader::new().load_all(dirs)?;
    log::debug!("Loaded {} group(s) from {} dir(s)", groups.len(), dirs.len());

    let mut builder = ConfigurationModelBuilder::new();
    for group in groups {
        builder.add_group(group)?;
    }
    Ok(builder.build()?)
}

/// Settings and model shared by every command.
pub fn prepare(
    global: &GlobalOptions,
    args: &[PathBuf],
) -> Result<(Settings, ConfigurationModel), CliError> {
    let settings = load_settings(global)?;
    let dirs = module_dirs(args, &settings)?;
    let model = assemble(&dirs)?;
    Ok((settings, model))
}

/// Resolve the output format: command line, then settings, then YAML.
pub fn output_format(global: &GlobalOptions, settings: &Settings) -> OutputFormat {
    global
        .format
        .or(settings.output_format)
        .unwrap_or_default()
}
