//! Environment variable handling for settings overrides.
//!
//! This module provides support for `CFGMERGE_*` environment variables that
//! override settings file values.

use std::env;

use crate::config::schema::Settings;
use crate::error::Result;

/// Overrides the output format.
pub const OUTPUT_FORMAT_ENV: &str = "CFGMERGE_OUTPUT_FORMAT";

/// Adds module directories, separated like `PATH`.
pub const MODULES_ENV: &str = "CFGMERGE_MODULES";

/// Handles environment variable overrides for settings.
///
/// # Examples
///
/// ```no_run
/// use cfgmerge::config::{EnvironmentSettings, Settings};
///
/// let mut settings = Settings::default();
/// EnvironmentSettings::apply_overrides(&mut settings).unwrap();
/// ```
pub struct EnvironmentSettings;

impl EnvironmentSettings {
    /// Apply environment variable overrides to settings.
    ///
    /// `CFGMERGE_OUTPUT_FORMAT` replaces the output format;
    /// `CFGMERGE_MODULES` appends module directories not already listed.
    ///
    /// # Errors
    ///
    /// Returns an error if `CFGMERGE_OUTPUT_FORMAT` is not a known format.
    pub fn apply_overrides(settings: &mut Settings) -> Result<()> {
        if let Ok(format) = env::var(OUTPUT_FORMAT_ENV) {
            if !format.is_empty() {
                settings.output_format = Some(format.parse()?);
            }
        }

        if let Some(paths) = env::var_os(MODULES_ENV) {
            let modules = settings.modules.get_or_insert_with(Vec::new);
            for path in env::split_paths(&paths) {
                if !path.as_os_str().is_empty() && !modules.contains(&path) {
                    modules.push(path);
                }
            }
        }

        Ok(())
    }
}
