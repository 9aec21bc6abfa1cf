//! Settings schema definitions.
//!
//! Settings tell the tool which module directories to assemble and how to
//! render the result. They never change merge semantics.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Complete settings structure.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
///
/// use cfgmerge::config::{OutputFormat, Settings};
///
/// let settings = Settings {
///     modules: Some(vec![PathBuf::from("modules/core")]),
///     output_format: Some(OutputFormat::Json),
/// };
/// assert_eq!(settings.output_format, Some(OutputFormat::Json));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Module directories to assemble, in load order.
    #[serde(default)]
    pub modules: Option<Vec<PathBuf>>,

    /// Output format for rendered models.
    pub output_format: Option<OutputFormat>,
}

/// Output format for rendered models.
///
/// # Examples
///
/// ```
/// use cfgmerge::config::OutputFormat;
///
/// let format: OutputFormat = "json".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// YAML output.
    #[default]
    Yaml,
    /// JSON output.
    Json,
    /// Human-readable indented tree.
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "text"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(Error::Validation {
                field: "output_format".to_string(),
                message: format!("unknown output format '{s}' (expected yaml, json or text)"),
            }),
        }
    }
}
