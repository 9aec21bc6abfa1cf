//! Entities that are ordered by name with "after" dependencies.

use std::collections::BTreeSet;

/// A named entity that may declare which siblings it must come after.
///
/// Names are unique within a sibling collection; `after` may only reference
/// names of the same collection.
pub trait Orderable {
    /// The name, unique among siblings.
    fn name(&self) -> &str;

    /// Names of the siblings this entity must be ordered after.
    fn after(&self) -> &BTreeSet<String>;
}

/// A bare orderable entity, mostly useful for tests and tooling.
///
/// # Examples
///
/// ```
/// use cfgmerge::model::{NamedEntry, Orderable};
///
/// let entry = NamedEntry::new("o1").with_after(["o2", "o3"]);
/// assert_eq!(entry.name(), "o1");
/// assert_eq!(entry.after().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedEntry {
    name: String,
    after: BTreeSet<String>,
}

impl NamedEntry {
    /// Create an entry without dependencies.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            after: BTreeSet::new(),
        }
    }

    /// Add dependencies.
    #[must_use]
    pub fn with_after<I, S>(mut self, after: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.after.extend(after.into_iter().map(Into::into));
        self
    }
}

impl Orderable for NamedEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn after(&self) -> &BTreeSet<String> {
        &self.after
    }
}
