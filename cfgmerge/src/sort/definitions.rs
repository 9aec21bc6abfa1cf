//! Ordering of the definitions contributed to one module.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::{
    Definition, Module, NamespaceDefinition, SourceLocation, TreeDefinition,
    WebFileBundleDefinition,
};
use crate::path::PathRelationship;

/// The definitions of one module, grouped by kind and ordered for processing.
#[derive(Debug, Default)]
pub struct SortedDefinitions<'a> {
    /// Config definitions, ancestors before descendants.
    pub config: Vec<&'a TreeDefinition>,
    /// Content definitions, ancestors before descendants.
    pub content: Vec<&'a TreeDefinition>,
    /// Namespace declarations in source order.
    pub namespaces: Vec<&'a NamespaceDefinition>,
    /// Web file bundle declarations in source order.
    pub web_file_bundles: Vec<&'a WebFileBundleDefinition>,
}

/// Orders the definitions of a module.
///
/// A definition is never placed before one rooted at an ancestor of its own
/// root; otherwise source load order and in-source order are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefinitionSorter;

impl DefinitionSorter {
    /// Create a sorter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Sort the definitions of `module`.
    ///
    /// # Errors
    ///
    /// - [`Error::MisplacedNamespace`] if more than one source declares namespaces
    /// - [`Error::DuplicateRootPath`] if two tree definitions of the same kind
    ///   share a root path
    pub fn sort<'a>(&self, module: &'a Module) -> Result<SortedDefinitions<'a>> {
        let mut sorted = SortedDefinitions::default();
        let mut namespace_source: Option<&Arc<SourceLocation>> = None;

        for source in module.sources() {
            if source.has_namespaces() {
                if let Some(first) = namespace_source {
                    return Err(Error::MisplacedNamespace {
                        module: module.qualified_name(),
                        first: first.to_string(),
                        second: source.location().to_string(),
                    });
                }
                namespace_source = Some(source.location());
            }

            for definition in source.definitions() {
                match definition {
                    Definition::Config(def) => sorted.config.push(def),
                    Definition::Content(def) => sorted.content.push(def),
                    Definition::Namespace(def) => sorted.namespaces.push(def),
                    Definition::WebFileBundle(def) => sorted.web_file_bundles.push(def),
                }
            }
        }

        check_unique_roots(module, &sorted.config)?;
        check_unique_roots(module, &sorted.content)?;
        sorted.config = ancestors_first(sorted.config);
        sorted.content = ancestors_first(sorted.content);

        log::debug!(
            "Sorted module '{}': {} config, {} content definition(s)",
            module.qualified_name(),
            sorted.config.len(),
            sorted.content.len()
        );
        Ok(sorted)
    }
}

fn check_unique_roots(module: &Module, definitions: &[&TreeDefinition]) -> Result<()> {
    let mut seen = HashMap::with_capacity(definitions.len());
    for definition in definitions {
        if let Some(first) = seen.insert(definition.root(), definition.origin()) {
            return Err(Error::DuplicateRootPath {
                path: definition.root().to_string(),
                module: module.qualified_name(),
                first: first.to_string(),
                second: definition.origin().to_string(),
            });
        }
    }
    Ok(())
}

/// Stable topological order over the "is proper ancestor of" relation.
fn ancestors_first<'a>(definitions: Vec<&'a TreeDefinition>) -> Vec<&'a TreeDefinition> {
    let count = definitions.len();
    let mut pending = vec![0usize; count];
    let mut successors = vec![Vec::new(); count];
    for (a, ancestor) in definitions.iter().enumerate() {
        for (d, descendant) in definitions.iter().enumerate() {
            if PathRelationship::is_proper_ancestor(ancestor.root(), descendant.root()) {
                successors[a].push(d);
                pending[d] += 1;
            }
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = (0..count)
        .filter(|&i| pending[i] == 0)
        .map(Reverse)
        .collect();
    let mut order = Vec::with_capacity(count);
    while let Some(Reverse(next)) = ready.pop() {
        order.push(definitions[next]);
        for &successor in &successors[next] {
            pending[successor] -= 1;
            if pending[successor] == 0 {
                ready.push(Reverse(successor));
            }
        }
    }
    order
}
