//! Property-based tests for settings merging.

use std::path::PathBuf;

use super::merger::SettingsMerger;
use super::schema::{OutputFormat, Settings};
use proptest::prelude::*;

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Yaml),
        Just(OutputFormat::Json),
        Just(OutputFormat::Text),
    ]
}

fn modules_strategy() -> impl Strategy<Value = Vec<PathBuf>> {
    prop::collection::btree_set("[a-z]{1,6}", 0..6)
        .prop_map(|names| names.into_iter().map(PathBuf::from).collect())
}

fn settings_strategy() -> impl Strategy<Value = Settings> {
    (
        prop::option::of(modules_strategy()),
        prop::option::of(format_strategy()),
    )
        .prop_map(|(modules, output_format)| Settings {
            modules,
            output_format,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Higher precedence wins when set
    #[test]
    fn merge_higher_precedence_wins(low in settings_strategy(), high in settings_strategy()) {
        let mut result = low.clone();
        SettingsMerger::merge_into(&mut result, &high);

        if high.output_format.is_some() {
            prop_assert_eq!(result.output_format, high.output_format);
        } else {
            prop_assert_eq!(result.output_format, low.output_format);
        }
    }

    // Empty settings are an identity for merge
    #[test]
    fn merge_identity(settings in settings_strategy()) {
        let mut merged = settings.clone();
        SettingsMerger::merge_into(&mut merged, &Settings::default());
        prop_assert_eq!(merged, settings);
    }

    // Module lists keep every entry from both sides, once
    #[test]
    fn merged_modules_are_union_without_duplicates(
        low in settings_strategy(),
        high in settings_strategy()
    ) {
        let mut result = low.clone();
        SettingsMerger::merge_into(&mut result, &high);
        let merged = result.modules.unwrap_or_default();

        for module in low.modules.iter().chain(high.modules.iter()).flatten() {
            prop_assert!(merged.contains(module));
        }
        for (i, module) in merged.iter().enumerate() {
            prop_assert!(!merged[i + 1..].contains(module));
        }
    }

    // Merging the same settings twice changes nothing
    #[test]
    fn merge_idempotent(base in settings_strategy(), other in settings_strategy()) {
        let mut once = base.clone();
        SettingsMerger::merge_into(&mut once, &other);
        let mut twice = once.clone();
        SettingsMerger::merge_into(&mut twice, &other);
        prop_assert_eq!(once, twice);
    }
}
