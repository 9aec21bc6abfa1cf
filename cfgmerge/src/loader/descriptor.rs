//! The `module.yaml` descriptor.

use serde::Deserialize;

/// `after` given as one name or a list of names.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AfterList {
    /// A single name.
    One(String),
    /// Several names.
    Many(Vec<String>),
}

impl AfterList {
    fn names(&self) -> Vec<String> {
        match self {
            Self::One(name) => vec![name.clone()],
            Self::Many(names) => names.clone(),
        }
    }
}

/// A group, project or module entry: a bare name or `{name, after}`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DescriptorEntry {
    /// Just a name.
    Name(String),
    /// A name with ordering constraints.
    Detailed {
        /// The entry name.
        name: String,
        /// Names this entry must come after.
        #[serde(default)]
        after: Option<AfterList>,
    },
}

impl DescriptorEntry {
    /// The entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Detailed { name, .. } => name,
        }
    }

    /// Names this entry must come after.
    #[must_use]
    pub fn after(&self) -> Vec<String> {
        match self {
            Self::Detailed {
                after: Some(after), ..
            } => after.names(),
            _ => Vec::new(),
        }
    }
}

/// Contents of a `module.yaml` file.
///
/// # Examples
///
/// ```
/// use cfgmerge::loader::ModuleDescriptor;
///
/// let descriptor: ModuleDescriptor = serde_yaml::from_str(
///     "group: core\nproject: {name: platform, after: base}\nmodule: repository\n",
/// )
/// .unwrap();
/// assert_eq!(descriptor.project.name(), "platform");
/// assert_eq!(descriptor.project.after(), vec!["base".to_string()]);
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ModuleDescriptor {
    /// The owning group.
    pub group: DescriptorEntry,
    /// The owning project.
    pub project: DescriptorEntry,
    /// The module itself.
    pub module: DescriptorEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_names() {
        let descriptor: ModuleDescriptor =
            serde_yaml::from_str("group: g\nproject: p\nmodule: m\n").unwrap();
        assert_eq!(descriptor.group.name(), "g");
        assert!(descriptor.module.after().is_empty());
    }

    #[test]
    fn test_after_list() {
        let descriptor: ModuleDescriptor = serde_yaml::from_str(
            "group: {name: g, after: [a, b]}\nproject: p\nmodule: {name: m}\n",
        )
        .unwrap();
        assert_eq!(descriptor.group.after(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(descriptor.module.name(), "m");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ModuleDescriptor, _> =
            serde_yaml::from_str("group: g\nproject: p\nmodule: m\nextra: 1\n");
        assert!(result.is_err());
    }
}
