//! Property values and the closed vocabularies used by definitions.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the built-in primary type property.
pub const JCR_PRIMARY_TYPE: &str = "jcr:primaryType";

/// Name of the built-in mixin types property.
pub const JCR_MIXIN_TYPES: &str = "jcr:mixinTypes";

/// Primary type carried by the root node.
pub const ROOT_PRIMARY_TYPE: &str = "rep:root";

/// Category of a configuration item.
///
/// Only [`Category::Config`] items are merged. Content and runtime items stay
/// in the tree as placeholders whose descendants are no longer merged.
///
/// # Examples
///
/// ```
/// use cfgmerge::model::Category;
///
/// let category: Category = "runtime".parse().unwrap();
/// assert_eq!(category, Category::Runtime);
/// assert!(!category.is_config());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Owned and merged by the configuration engine.
    Config,
    /// Owned by content bootstrapping.
    Content,
    /// Owned by the running system.
    Runtime,
}

impl Category {
    /// Whether this is [`Category::Config`].
    #[must_use]
    pub fn is_config(self) -> bool {
        self == Self::Config
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "config"),
            Self::Content => write!(f, "content"),
            Self::Runtime => write!(f, "runtime"),
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "config" => Ok(Self::Config),
            "content" => Ok(Self::Content),
            "runtime" => Ok(Self::Runtime),
            _ => Err(Error::Validation {
                field: ".meta:category".to_string(),
                message: format!("unknown category '{s}'"),
            }),
        }
    }
}

/// Multiplicity of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Exactly one value.
    Single,
    /// An ordered list of values.
    List,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::List => write!(f, "list"),
        }
    }
}

/// Type of the values of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Text.
    String,
    /// Raw bytes.
    Binary,
    /// 64-bit integer.
    Long,
    /// Floating point number.
    Double,
    /// Arbitrary precision decimal.
    Decimal,
    /// Boolean.
    Boolean,
    /// Calendar date.
    Date,
    /// Qualified name.
    Name,
    /// Node path.
    Path,
    /// Hard node reference.
    Reference,
    /// Weak node reference.
    WeakReference,
    /// URI.
    Uri,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Binary => "binary",
            Self::Long => "long",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Name => "name",
            Self::Path => "path",
            Self::Reference => "reference",
            Self::WeakReference => "weakreference",
            Self::Uri => "uri",
        };
        f.write_str(name)
    }
}

impl FromStr for ValueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "string" => Self::String,
            "binary" => Self::Binary,
            "long" => Self::Long,
            "double" => Self::Double,
            "decimal" => Self::Decimal,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "name" => Self::Name,
            "path" => Self::Path,
            "reference" => Self::Reference,
            "weakreference" => Self::WeakReference,
            "uri" => Self::Uri,
            _ => {
                return Err(Error::Validation {
                    field: "type".to_string(),
                    message: format!("unknown value type '{s}'"),
                })
            }
        })
    }
}

/// How a property definition is folded into an existing property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyOperation {
    /// Replace the values, guarded by type and protection checks.
    #[default]
    Replace,
    /// Append values to a list property.
    Add,
    /// Unconditionally replace type, value type and values.
    Override,
    /// Remove the property.
    Delete,
}

impl fmt::Display for PropertyOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace => write!(f, "replace"),
            Self::Add => write!(f, "add"),
            Self::Override => write!(f, "override"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for PropertyOperation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "replace" => Ok(Self::Replace),
            "add" => Ok(Self::Add),
            "override" => Ok(Self::Override),
            "delete" => Ok(Self::Delete),
            _ => Err(Error::Validation {
                field: "operation".to_string(),
                message: format!("unknown property operation '{s}'"),
            }),
        }
    }
}

/// An external resource backing a value, compared by content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    #[serde(rename = "resource")]
    path: String,
    #[serde(skip)]
    content: Arc<[u8]>,
}

impl Resource {
    /// Create a resource reference with its loaded content.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// The source-relative path of the resource.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The resource content.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// A single property value.
///
/// # Examples
///
/// ```
/// use cfgmerge::model::{Resource, Value};
///
/// assert!(Value::from("a").is_equivalent(&Value::from("a")));
///
/// let one = Value::Resource(Resource::new("one.txt", b"same".to_vec()));
/// let two = Value::Resource(Resource::new("two.txt", b"same".to_vec()));
/// assert!(one.is_equivalent(&two));
/// assert_ne!(one, two);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// An inline scalar in its textual form.
    Inline(String),
    /// Content loaded from an external resource.
    Resource(Resource),
}

impl Value {
    /// Whether two values carry the same content.
    ///
    /// Inline values compare by text, resources by bytes. An inline value is
    /// never equivalent to a resource.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Inline(a), Self::Inline(b)) => a == b,
            (Self::Resource(a), Self::Resource(b)) => a.content() == b.content(),
            _ => false,
        }
    }

    /// Whether the value is backed by an external resource.
    #[must_use]
    pub fn is_resource(&self) -> bool {
        matches!(self, Self::Resource(_))
    }

    /// The inline text, `None` for resources.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Inline(text) => Some(text),
            Self::Resource(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(text) => f.write_str(text),
            Self::Resource(resource) => write!(f, "resource:{}", resource.path()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Inline(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Inline(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Inline(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Inline(value.to_string())
    }
}

/// Whether two value lists are pairwise equivalent.
#[must_use]
pub fn values_equivalent(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.is_equivalent(y))
}

/// Whether `candidate` contains an equivalent of every value in `existing`.
#[must_use]
pub fn values_superset(candidate: &[Value], existing: &[Value]) -> bool {
    existing
        .iter()
        .all(|value| candidate.iter().any(|c| c.is_equivalent(value)))
}
