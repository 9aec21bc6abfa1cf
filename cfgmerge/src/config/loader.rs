//! Settings file discovery and loading.
//!
//! This module handles discovering and loading cfgmerge settings files
//! from various locations with proper precedence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Settings;
use crate::error::{Error, Result};

/// Project settings file name.
pub const SETTINGS_FILE: &str = "cfgmerge.yaml";

/// Private project settings file name.
pub const LOCAL_SETTINGS_FILE: &str = "cfgmerge.local.yaml";

/// Settings source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
///
/// # Examples
///
/// ```
/// use cfgmerge::config::SettingsSource;
/// use std::path::PathBuf;
///
/// let user_settings = SettingsSource {
///     path: PathBuf::from("~/.config/cfgmerge/settings.yaml"),
///     precedence: 1,
///     settings: Default::default(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct SettingsSource {
    /// Path to the settings file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed settings, with module paths resolved against the file.
    pub settings: Settings,
}

/// Loads settings from various sources.
///
/// # Examples
///
/// ```no_run
/// use cfgmerge::config::SettingsLoader;
/// use std::path::Path;
///
/// let sources = SettingsLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} settings sources", sources.len());
/// ```
pub struct SettingsLoader;

impl SettingsLoader {
    /// Discover and load all settings files.
    ///
    /// Searches for:
    /// 1. User settings at `~/.config/cfgmerge/settings.yaml` (precedence 1)
    /// 2. `cfgmerge.yaml` walking up from `working_dir` (precedence 2)
    /// 3. `cfgmerge.local.yaml` next to it (precedence 3)
    ///
    /// `user_dir` overrides where the user settings are loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if any settings file exists but cannot be read
    /// or parsed.
    pub fn load_all(working_dir: &Path, user_dir: Option<&Path>) -> Result<Vec<SettingsSource>> {
        let mut sources = Vec::new();

        if let Some(user_settings) = Self::load_user_settings(user_dir)? {
            sources.push(user_settings);
        }

        sources.extend(Self::discover_project_settings(working_dir)?);

        // Higher precedence last for easier processing
        sources.sort_by_key(|s| s.precedence);

        Ok(sources)
    }

    fn load_user_settings(user_dir: Option<&Path>) -> Result<Option<SettingsSource>> {
        let path = match user_dir {
            Some(dir) => dir.join("settings.yaml"),
            None => match Self::user_settings_path() {
                Some(path) => path,
                None => return Ok(None),
            },
        };

        if !path.exists() {
            return Ok(None);
        }

        let settings = Self::load_file(&path)?;
        Ok(Some(SettingsSource {
            path,
            precedence: 1,
            settings,
        }))
    }

    /// Discover project settings by walking up directories.
    ///
    /// Stops at the first directory containing either settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if any discovered file cannot be read or parsed.
    pub fn discover_project_settings(start_dir: &Path) -> Result<Vec<SettingsSource>> {
        let mut found = Vec::new();
        let mut current = start_dir.to_path_buf();

        loop {
            for (name, precedence) in [(SETTINGS_FILE, 2), (LOCAL_SETTINGS_FILE, 3)] {
                let path = current.join(name);
                if path.exists() {
                    let settings = Self::load_file(&path)?;
                    found.push(SettingsSource {
                        path,
                        precedence,
                        settings,
                    });
                }
            }

            if !found.is_empty() || !current.pop() {
                break;
            }
        }

        Ok(found)
    }

    /// Load and parse a YAML settings file.
    ///
    /// Relative module paths are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Settings> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut settings: Settings =
            serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
                field: format!("{}", path.display()),
                message: format!("Invalid YAML: {e}"),
            })?;

        if let (Some(modules), Some(base)) = (settings.modules.as_mut(), path.parent()) {
            for module in modules.iter_mut() {
                if module.is_relative() {
                    *module = base.join(&*module);
                }
            }
        }

        Ok(settings)
    }

    fn user_settings_path() -> Option<PathBuf> {
        home::home_dir().map(|home| home.join(".config").join("cfgmerge").join("settings.yaml"))
    }
}
