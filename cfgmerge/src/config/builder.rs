//! Builder for assembling settings from every source.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentSettings;
use crate::config::loader::SettingsLoader;
use crate::config::merger::SettingsMerger;
use crate::config::schema::Settings;
use crate::config::validator::SettingsValidator;
use crate::error::Result;

/// Assembles [`Settings`] with full precedence handling.
///
/// # Examples
///
/// ```
/// use cfgmerge::config::{OutputFormat, Settings, SettingsBuilder};
///
/// let settings = SettingsBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_settings(Settings {
///         output_format: Some(OutputFormat::Text),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(settings.output_format, Some(OutputFormat::Text));
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    working_dir: Option<PathBuf>,
    user_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    overrides: Option<Settings>,
    skip_files: bool,
    skip_env: bool,
}

impl SettingsBuilder {
    /// Create a builder with default discovery.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start project settings discovery from `dir` instead of the current
    /// directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Load user settings from `dir` instead of `~/.config/cfgmerge`.
    #[must_use]
    pub fn with_user_dir(mut self, dir: &Path) -> Self {
        self.user_dir = Some(dir.to_path_buf());
        self
    }

    /// Use exactly this settings file, skipping discovery.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Programmatic settings, applied last.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.overrides = Some(settings);
        self
    }

    /// Do not read any settings file.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `CFGMERGE_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Load, merge and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file cannot be read or parsed, an
    /// environment override is invalid, or a listed module directory does
    /// not exist.
    pub fn build(self) -> Result<Settings> {
        let mut settings = Settings::default();

        if !self.skip_files {
            if let Some(ref path) = self.config_file {
                let loaded = SettingsLoader::load_file(path)?;
                SettingsMerger::merge_into(&mut settings, &loaded);
            } else {
                let working_dir = match self.working_dir {
                    Some(ref dir) => dir.clone(),
                    None => std::env::current_dir()?,
                };
                let sources = SettingsLoader::load_all(&working_dir, self.user_dir.as_deref())?;
                for source in &sources {
                    log::debug!("Loaded settings from {}", source.path.display());
                }
                settings = SettingsMerger::merge(sources);
            }
        }

        if !self.skip_env {
            EnvironmentSettings::apply_overrides(&mut settings)?;
        }

        if let Some(ref overrides) = self.overrides {
            SettingsMerger::merge_into(&mut settings, overrides);
        }

        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}
