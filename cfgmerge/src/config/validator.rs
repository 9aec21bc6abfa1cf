//! Settings validation.

use std::path::Path;

use crate::config::schema::Settings;
use crate::error::{Error, Result};
use crate::loader::MODULE_DESCRIPTOR;

/// Validates assembled settings.
///
/// # Examples
///
/// ```
/// use cfgmerge::config::{Settings, SettingsValidator};
///
/// SettingsValidator::validate(&Settings::default()).unwrap();
/// ```
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings.
    ///
    /// Every listed module must be a directory containing a module
    /// descriptor.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first bad module path.
    pub fn validate(settings: &Settings) -> Result<()> {
        if let Some(ref modules) = settings.modules {
            for module in modules {
                Self::validate_module_dir(module)?;
            }
        }
        Ok(())
    }

    /// Check that `dir` looks like a module directory.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `dir` is missing or has no descriptor.
    pub fn validate_module_dir(dir: &Path) -> Result<()> {
        if !dir.is_dir() {
            return Err(Error::Validation {
                field: "modules".into(),
                message: format!("'{}' is not a directory", dir.display()),
            });
        }
        if !dir.join(MODULE_DESCRIPTOR).is_file() {
            return Err(Error::Validation {
                field: "modules".into(),
                message: format!("'{}' has no {MODULE_DESCRIPTOR}", dir.display()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_empty_settings_valid() {
        assert!(SettingsValidator::validate(&Settings::default()).is_ok());
    }

    #[test]
    fn test_missing_dir() {
        let settings = Settings {
            modules: Some(vec![PathBuf::from("/nonexistent/module")]),
            ..Default::default()
        };
        let err = SettingsValidator::validate(&settings).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_missing_descriptor() {
        let dir = TempDir::new().unwrap();
        let err = SettingsValidator::validate_module_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains(MODULE_DESCRIPTOR));
    }

    #[test]
    fn test_valid_module_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(MODULE_DESCRIPTOR), "group: g\nproject: p\nmodule: m\n").unwrap();
        assert!(SettingsValidator::validate_module_dir(dir.path()).is_ok());
    }
}
