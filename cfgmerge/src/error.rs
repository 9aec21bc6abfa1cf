//! Error types for the cfgmerge library.
//!
//! Every failure of the assembly pipeline is immediately fatal to the current
//! `add_group`/`build`/`push` call. Recoverable conditions are reported as
//! warnings through the `log` facade instead and never show up here.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a cfgmerge error.
///
/// # Examples
///
/// ```
/// use cfgmerge::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the cfgmerge library.
#[derive(Debug, Error)]
pub enum Error {
    /// Two entries of an orderable collection share a name.
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName {
        /// The kind of entity ("group", "project", "module", ...).
        kind: String,
        /// The duplicated name.
        name: String,
    },

    /// The `after` edges of an orderable collection form a cycle.
    #[error("circular dependency between {kind}s: {cycle}")]
    CircularDependency {
        /// The kind of entity ("group", "project", "module", ...).
        kind: String,
        /// The cycle, rendered as `a -> b -> c -> a`.
        cycle: String,
    },

    /// An `after` entry references a name that is not in the collection.
    #[error("{kind} '{name}' has a missing dependency '{dependency}'")]
    MissingDependency {
        /// The kind of entity ("group", "project", "module", ...).
        kind: String,
        /// The entity declaring the dependency.
        name: String,
        /// The dependency that could not be found.
        dependency: String,
    },

    /// Two definitions of one module declare the identical root path.
    #[error(
        "duplicate definition root path '{path}' in module '{module}': defined in '{first}' and in '{second}'"
    )]
    DuplicateRootPath {
        /// The duplicated root path.
        path: String,
        /// The qualified name of the module.
        module: String,
        /// Origin of the first definition.
        first: String,
        /// Origin of the second definition.
        second: String,
    },

    /// Namespace definitions are spread over more than one source of a module.
    #[error(
        "namespace definitions of module '{module}' must be in a single source: found in '{first}' and in '{second}'"
    )]
    MisplacedNamespace {
        /// The qualified name of the module.
        module: String,
        /// The first source declaring namespaces.
        first: String,
        /// The second source declaring namespaces.
        second: String,
    },

    /// A definition is rooted below a node that does not exist.
    #[error(
        "{origin} contains definition rooted at unreachable node '{path}'. Closest ancestor is at '{closest_ancestor}'."
    )]
    UnreachableNode {
        /// Origin of the definition.
        origin: String,
        /// The unreachable root path.
        path: String,
        /// The deepest existing ancestor.
        closest_ancestor: String,
    },

    /// A same-name sibling is introduced without its predecessor.
    #[error("{origin} defines node '{path}', but no sibling named '{sibling}' was found")]
    MissingSibling {
        /// Origin of the definition.
        origin: String,
        /// The node being introduced.
        path: String,
        /// The sibling that has to exist first.
        sibling: String,
    },

    /// A module with the same qualified name is contributed twice.
    #[error("module '{module}' is defined more than once: in '{first}' and in '{second}'")]
    ModuleMergeConflict {
        /// Qualified `group/project/module` name.
        module: String,
        /// Where the existing module came from.
        first: String,
        /// Where the conflicting module came from.
        second: String,
    },

    /// Two modules declare a web file bundle with the same name.
    #[error("duplicate web file bundle name '{name}': declared in '{first}' and in '{second}'")]
    DuplicateBundleName {
        /// The bundle name.
        name: String,
        /// Origin of the first declaration.
        first: String,
        /// Origin of the second declaration.
        second: String,
    },

    /// A namespace prefix is bound to two different URIs.
    #[error(
        "namespace prefix '{prefix}' is bound to '{existing_uri}' in '{first}' but to '{uri}' in '{second}'"
    )]
    NamespaceConflict {
        /// The namespace prefix.
        prefix: String,
        /// The URI registered first.
        existing_uri: String,
        /// Origin of the first registration.
        first: String,
        /// The conflicting URI.
        uri: String,
        /// Origin of the conflicting registration.
        second: String,
    },

    /// A property is redefined with a different multiplicity.
    #[error(
        "property '{path}' already exists with type '{existing}', but type '{requested}' is requested in {origin}"
    )]
    PropertyTypeConflict {
        /// The property path.
        path: String,
        /// The existing type.
        existing: String,
        /// The requested type.
        requested: String,
        /// Origin of the conflicting definition.
        origin: String,
    },

    /// A property is redefined with a different value type.
    #[error(
        "property '{path}' already exists with value type '{existing}', but value type '{requested}' is requested in {origin}"
    )]
    PropertyValueTypeConflict {
        /// The property path.
        path: String,
        /// The existing value type.
        existing: String,
        /// The requested value type.
        requested: String,
        /// Origin of the conflicting definition.
        origin: String,
    },

    /// A protected property value is changed without `operation: override`.
    #[error("{origin}: {details} for property '{path}'; use 'operation: override' to change it")]
    UnguardedValueChange {
        /// The property path.
        path: String,
        /// Origin of the offending definition.
        origin: String,
        /// Description of the rejected change.
        details: String,
    },

    /// An `order-before` directive cannot be honoured.
    #[error("{origin}: invalid order-before '{target}' for node '{path}': {reason}")]
    InvalidOrderBefore {
        /// The node being reordered.
        path: String,
        /// The requested sibling.
        target: String,
        /// Origin of the definition.
        origin: String,
        /// Why the directive was rejected.
        reason: String,
    },

    /// A textual node path could not be parsed.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path text.
        path: String,
        /// Why it is invalid.
        reason: String,
    },

    /// Input documents or settings failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field or file that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML document could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Check if the error is a structural problem of an orderable collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgmerge::Error;
    ///
    /// let err = Error::DuplicateName { kind: "group".into(), name: "core".into() };
    /// assert!(err.is_ordering_error());
    /// ```
    #[must_use]
    pub fn is_ordering_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateName { .. }
                | Self::CircularDependency { .. }
                | Self::MissingDependency { .. }
        )
    }

    /// Check if the error is a conflict between two property definitions.
    #[must_use]
    pub fn is_property_conflict(&self) -> bool {
        matches!(
            self,
            Self::PropertyTypeConflict { .. }
                | Self::PropertyValueTypeConflict { .. }
                | Self::UnguardedValueChange { .. }
        )
    }
}
