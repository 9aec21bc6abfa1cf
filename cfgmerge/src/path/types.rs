//! Core types for node path handling.
//!
//! A [`NodePath`] is an absolute, slash-separated sequence of [`PathSegment`]s.
//! Each segment is a node name plus an optional same-name-sibling index.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// One segment of a node path: a name and an optional SNS index.
///
/// A segment without an explicit index addresses the first sibling, so
/// `name` and `name[1]` compare equal. The explicit form is preserved for
/// display so messages show what the author wrote.
///
/// # Examples
///
/// ```
/// use cfgmerge::path::PathSegment;
///
/// let implicit: PathSegment = "sns".parse().unwrap();
/// let explicit: PathSegment = "sns[1]".parse().unwrap();
/// assert_eq!(implicit, explicit);
/// assert_eq!(implicit.index(), 1);
/// assert_eq!(explicit.to_string(), "sns[1]");
///
/// let second: PathSegment = "sns[2]".parse().unwrap();
/// assert_ne!(implicit, second);
/// assert_eq!(second.key(), "sns[2]");
/// ```
#[derive(Debug, Clone)]
pub struct PathSegment {
    name: String,
    index: Option<usize>,
}

impl PathSegment {
    /// Create a segment without an explicit index.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    /// Create a segment with an explicit 1-based index.
    #[must_use]
    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index: Some(index.max(1)),
        }
    }

    /// Parse a segment such as `name` or `name[3]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for empty names, names containing `/`,
    /// and malformed or zero indices.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidPath {
            path: text.to_string(),
            reason: reason.to_string(),
        };

        if text.is_empty() {
            return Err(invalid("empty segment"));
        }
        if text.contains('/') {
            return Err(invalid("segment cannot contain '/'"));
        }

        let Some(open) = text.find('[') else {
            if text.contains(']') {
                return Err(invalid("unbalanced ']'"));
            }
            return Ok(Self::new(text));
        };

        let name = &text[..open];
        let rest = &text[open + 1..];
        let Some(digits) = rest.strip_suffix(']') else {
            return Err(invalid("index must be terminated by ']'"));
        };
        if name.is_empty() {
            return Err(invalid("empty name"));
        }
        let index: usize = digits
            .parse()
            .map_err(|_| invalid("index must be a positive number"))?;
        if index == 0 {
            return Err(invalid("index must be 1 or greater"));
        }

        Ok(Self::indexed(name, index))
    }

    /// The node name without index.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The effective 1-based index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index.unwrap_or(1)
    }

    /// Whether the author wrote an explicit index.
    #[must_use]
    pub fn has_explicit_index(&self) -> bool {
        self.index.is_some()
    }

    /// The canonical child key, always `name[index]`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}[{}]", self.name, self.index())
    }

    /// The same name with another index.
    #[must_use]
    pub fn with_index(&self, index: usize) -> Self {
        Self::indexed(self.name.clone(), index)
    }
}

impl PartialEq for PathSegment {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.index() == other.index()
    }
}

impl Eq for PathSegment {}

impl Hash for PathSegment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.index().hash(state);
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{index}]", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for PathSegment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// An absolute path in the configuration tree.
///
/// The root path is `/` and has no segments.
///
/// # Examples
///
/// ```
/// use cfgmerge::path::NodePath;
///
/// let path: NodePath = "/a/b[2]/c".parse().unwrap();
/// assert_eq!(path.depth(), 3);
/// assert_eq!(path.parent().unwrap().to_string(), "/a/b[2]");
/// assert!(NodePath::root().is_root());
/// assert_eq!(NodePath::root().to_string(), "/");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    /// The root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse an absolute path.
    ///
    /// A single trailing `/` is tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the path is relative or any segment
    /// is malformed.
    pub fn parse(text: &str) -> Result<Self> {
        let Some(rest) = text.strip_prefix('/') else {
            return Err(Error::InvalidPath {
                path: text.to_string(),
                reason: "path must be absolute".to_string(),
            });
        };
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        if rest.is_empty() {
            return Ok(Self::root());
        }

        let segments = rest
            .split('/')
            .map(|segment| {
                PathSegment::parse(segment).map_err(|e| match e {
                    Error::InvalidPath { reason, .. } => Error::InvalidPath {
                        path: text.to_string(),
                        reason,
                    },
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { segments })
    }

    /// Build a path from segments.
    #[must_use]
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments of this path, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The last segment, `None` for the root.
    #[must_use]
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The parent path, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// A child path of this path.
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// The path of the first `count` segments.
    #[must_use]
    pub fn prefix(&self, count: usize) -> Self {
        Self {
            segments: self.segments[..count.min(self.segments.len())].to_vec(),
        }
    }

    /// Whether `self` starts with all segments of `other`.
    #[must_use]
    pub fn starts_with(&self, other: &Self) -> bool {
        other.segments.len() <= self.segments.len()
            && self.segments.iter().zip(&other.segments).all(|(a, b)| a == b)
    }

    /// The path of a property of the node at this path.
    #[must_use]
    pub fn property(&self, name: &str) -> String {
        if self.is_root() {
            format!("/{name}")
        } else {
            format!("{self}/{name}")
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
