//! Path relationship checking.
//!
//! This module provides functionality to determine the relationship between
//! two node paths, such as whether one is an ancestor or descendant of the
//! other. Definition ordering within a module is driven by these relations.

use super::types::NodePath;

/// Relationship between two node paths.
///
/// # Examples
///
/// ```
/// use cfgmerge::path::{NodePath, PathRelationship};
///
/// let parent: NodePath = "/a".parse().unwrap();
/// let child: NodePath = "/a/b".parse().unwrap();
///
/// assert_eq!(
///     PathRelationship::between(&parent, &child),
///     PathRelationship::Ancestor
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The first path is an ancestor of the second.
    Ancestor,

    /// The first path is a descendant of the second.
    Descendant,

    /// The paths address the same node.
    ///
    /// `name` and `name[1]` address the same node.
    Same,

    /// Neither path is an ancestor or descendant of the other.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgmerge::path::{NodePath, PathRelationship};
    ///
    /// let p = |s: &str| s.parse::<NodePath>().unwrap();
    ///
    /// assert_eq!(PathRelationship::between(&p("/a"), &p("/a/b")), PathRelationship::Ancestor);
    /// assert_eq!(PathRelationship::between(&p("/a/b"), &p("/a")), PathRelationship::Descendant);
    /// assert_eq!(PathRelationship::between(&p("/a"), &p("/a[1]")), PathRelationship::Same);
    /// assert_eq!(PathRelationship::between(&p("/a"), &p("/b")), PathRelationship::Unrelated);
    /// ```
    #[must_use]
    pub fn between(path1: &NodePath, path2: &NodePath) -> Self {
        if path1 == path2 {
            return Self::Same;
        }

        if path2.starts_with(path1) {
            return Self::Ancestor;
        }

        if path1.starts_with(path2) {
            return Self::Descendant;
        }

        Self::Unrelated
    }

    /// Check if the relationship is hierarchical (not unrelated).
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgmerge::path::PathRelationship;
    ///
    /// assert!(PathRelationship::Ancestor.is_hierarchical());
    /// assert!(PathRelationship::Same.is_hierarchical());
    /// assert!(!PathRelationship::Unrelated.is_hierarchical());
    /// ```
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        matches!(self, Self::Ancestor | Self::Descendant | Self::Same)
    }

    /// Check if `ancestor` is a proper ancestor of `path`.
    #[must_use]
    pub fn is_proper_ancestor(ancestor: &NodePath, path: &NodePath) -> bool {
        Self::between(ancestor, path) == Self::Ancestor
    }

    /// Get a human-readable description of the relationship.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgmerge::path::{NodePath, PathRelationship};
    ///
    /// let p1: NodePath = "/a".parse().unwrap();
    /// let p2: NodePath = "/a/b".parse().unwrap();
    ///
    /// let desc = PathRelationship::Ancestor.description(&p1, &p2);
    /// assert_eq!(desc, "/a is an ancestor of /a/b");
    /// ```
    #[must_use]
    pub fn description(&self, path1: &NodePath, path2: &NodePath) -> String {
        match self {
            Self::Ancestor => format!("{path1} is an ancestor of {path2}"),
            Self::Descendant => format!("{path1} is a descendant of {path2}"),
            Self::Same => format!("{path1} and {path2} are the same node"),
            Self::Unrelated => format!("{path1} and {path2} are unrelated nodes"),
        }
    }
}
