//! Tool settings for cfgmerge.
//!
//! Settings select the module directories to assemble and the output format.
//! They are merged from several sources, highest precedence first:
//!
//! 1. Programmatic overrides (via `SettingsBuilder::with_settings`)
//! 2. Environment variables (`CFGMERGE_*`)
//! 3. Private project settings (`cfgmerge.local.yaml`)
//! 4. Project settings (`cfgmerge.yaml`)
//! 5. User settings (`~/.config/cfgmerge/settings.yaml`)
//!
//! Module lists accumulate across sources; relative module paths are
//! resolved against the file that names them.
//!
//! # Examples
//!
//! ```no_run
//! use cfgmerge::config::SettingsBuilder;
//! use std::path::Path;
//!
//! let settings = SettingsBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//!
//! for module in settings.modules.unwrap_or_default() {
//!     println!("{}", module.display());
//! }
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::SettingsBuilder;
pub use environment::EnvironmentSettings;
pub use loader::{SettingsLoader, SettingsSource};
pub use merger::SettingsMerger;
pub use schema::{OutputFormat, Settings};
pub use validator::SettingsValidator;
