//! Settings merging and precedence handling.
//!
//! Scalar settings follow precedence; the module list accumulates.

use crate::config::loader::SettingsSource;
use crate::config::schema::Settings;

/// Merges settings sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use cfgmerge::config::{OutputFormat, Settings, SettingsMerger};
///
/// let low = Settings { output_format: Some(OutputFormat::Yaml), ..Default::default() };
/// let high = Settings { output_format: Some(OutputFormat::Json), ..Default::default() };
///
/// let mut result = low;
/// SettingsMerger::merge_into(&mut result, &high);
/// assert_eq!(result.output_format, Some(OutputFormat::Json));
/// ```
pub struct SettingsMerger;

impl SettingsMerger {
    /// Merge multiple settings sources into final settings.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<SettingsSource>) -> Settings {
        let mut result = Settings::default();
        for source in sources {
            Self::merge_into(&mut result, &source.settings);
        }
        result
    }

    /// Merge source settings into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - `output_format`: source overwrites if set
    /// - `modules`: accumulated in order, duplicates dropped
    pub fn merge_into(target: &mut Settings, source: &Settings) {
        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_modules) = source.modules {
            let modules = target.modules.get_or_insert_with(Vec::new);
            for module in source_modules {
                if !modules.contains(module) {
                    modules.push(module.clone());
                }
            }
        }
    }
}
