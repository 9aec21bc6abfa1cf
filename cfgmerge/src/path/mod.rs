//! Node path handling.
//!
//! Paths address nodes in the configuration tree. They are absolute and
//! slash-separated; every segment may carry a 1-based same-name-sibling
//! (SNS) index:
//!
//! ```
//! use cfgmerge::path::{NodePath, PathRelationship};
//!
//! let parent: NodePath = "/config/modules".parse().unwrap();
//! let child: NodePath = "/config/modules/sns[2]".parse().unwrap();
//!
//! let rel = PathRelationship::between(&parent, &child);
//! assert_eq!(rel, PathRelationship::Ancestor);
//! assert_eq!(child.last().unwrap().index(), 2);
//! ```
//!
//! A segment without an explicit index is equivalent to index `1`, so
//! `/a/b` and `/a[1]/b[1]` address the same node.

pub mod relationship;
mod types;

#[cfg(test)]
mod proptests;

// Re-export key types
pub use relationship::PathRelationship;
pub use types::{NodePath, PathSegment};
