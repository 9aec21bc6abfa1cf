//! Loading module directories from disk.
//!
//! A module directory holds a `module.yaml` descriptor naming its group,
//! project and module, plus YAML sources below `config/` and `content/`:
//!
//! ```text
//! my-module/
//!   module.yaml
//!   config/
//!     main.yaml
//!     extra/more.yaml
//!   content/
//!     pages.yaml
//! ```
//!
//! Sources are visited in path order and identified by their module-relative
//! path with `/` separators.

mod descriptor;
mod document;

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::model::{Group, SourceKind};

pub use descriptor::{AfterList, DescriptorEntry, ModuleDescriptor};
use document::DocumentParser;

/// Name of the module descriptor file.
pub const MODULE_DESCRIPTOR: &str = "module.yaml";

/// Loads module directories into [`Group`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleLoader;

impl ModuleLoader {
    /// Create a loader.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Load one module directory.
    ///
    /// The returned group contains exactly one project with one module.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor or a source cannot be read or
    /// parsed.
    pub fn load(&self, dir: &Path) -> Result<Group> {
        let descriptor_path = dir.join(MODULE_DESCRIPTOR);
        let text = read_file(&descriptor_path)?;
        let descriptor: ModuleDescriptor =
            serde_yaml::from_str(&text).map_err(|e| Error::Validation {
                field: descriptor_path.display().to_string(),
                message: e.to_string(),
            })?;

        let mut group = Group::new(descriptor.group.name());
        group.add_after(descriptor.group.after());
        let project = group.add_project(descriptor.project.name());
        project.add_after(descriptor.project.after());
        let module = project.add_module(descriptor.module.name())?;
        module
            .add_after(descriptor.module.after())
            .set_origin(dir.display().to_string());

        for (kind, subdir) in [(SourceKind::Config, "config"), (SourceKind::Content, "content")] {
            for file in yaml_files(&dir.join(subdir))? {
                let relative = relative_path(dir, &file);
                debug!("Loading {} source '{relative}'", module.qualified_name());
                let text = read_file(&file)?;
                let source = match kind {
                    SourceKind::Config => module.add_config_source(relative),
                    SourceKind::Content => module.add_content_source(relative),
                };
                DocumentParser::new(&file).parse_into(&text, source)?;
            }
        }

        Ok(group)
    }

    /// Load several module directories in the given order.
    ///
    /// # Errors
    ///
    /// Returns the first load error.
    pub fn load_all<P: AsRef<Path>>(&self, dirs: &[P]) -> Result<Vec<Group>> {
        dirs.iter().map(|dir| self.load(dir.as_ref())).collect()
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn relative_path(base: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(base).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// All `.yaml`/`.yml` files below `dir`, sorted by path; empty if `dir` is
/// missing.
fn yaml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !dir.is_dir() {
        return Ok(files);
    }
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|source| Error::Read {
            path: current.clone(),
            source,
        })?;
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml" | "yml")
            ) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}
