//! Sorting of orderable entities and of module definitions.
//!
//! Groups, projects and modules are ordered with
//! [`OrderableByNameListSorter`]; the definitions inside one module are ordered
//! with [`DefinitionSorter`].

mod definitions;
mod orderable;

#[cfg(test)]
mod proptests;

pub use definitions::{DefinitionSorter, SortedDefinitions};
pub use orderable::OrderableByNameListSorter;
