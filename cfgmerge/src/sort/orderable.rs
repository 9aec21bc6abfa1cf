//! Dependency-aware sorting of named entities.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::Orderable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    InProgress,
    Done,
}

/// Sorts orderable entities so every entity follows the ones it names in
/// `after`.
///
/// The result does not depend on input order: entities are visited by name
/// and dependencies are resolved depth first, also by name.
///
/// # Examples
///
/// ```
/// use cfgmerge::model::{NamedEntry, Orderable};
/// use cfgmerge::sort::OrderableByNameListSorter;
///
/// let mut entries = vec![
///     NamedEntry::new("c"),
///     NamedEntry::new("a").with_after(["b"]),
///     NamedEntry::new("b"),
/// ];
/// OrderableByNameListSorter::new("group").sort(&mut entries).unwrap();
///
/// let names: Vec<_> = entries.iter().map(Orderable::name).collect();
/// assert_eq!(names, vec!["b", "a", "c"]);
/// ```
#[derive(Debug, Clone)]
pub struct OrderableByNameListSorter {
    kind: String,
}

impl OrderableByNameListSorter {
    /// Create a sorter; `kind` names the entities in error messages.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    /// Sort `items` in place.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateName`] if two entries share a name
    /// - [`Error::MissingDependency`] if an `after` entry names no entry
    /// - [`Error::CircularDependency`] if the `after` edges form a cycle
    pub fn sort<T: Orderable>(&self, items: &mut Vec<T>) -> Result<()> {
        let mut by_name: BTreeMap<&str, usize> = BTreeMap::new();
        for (index, item) in items.iter().enumerate() {
            if by_name.insert(item.name(), index).is_some() {
                return Err(Error::DuplicateName {
                    kind: self.kind.clone(),
                    name: item.name().to_string(),
                });
            }
        }

        for item in items.iter() {
            if let Some(dependency) = item.after().iter().find(|d| !by_name.contains_key(d.as_str())) {
                return Err(Error::MissingDependency {
                    kind: self.kind.clone(),
                    name: item.name().to_string(),
                    dependency: dependency.clone(),
                });
            }
        }

        let mut state = vec![Visit::Pending; items.len()];
        let mut stack = Vec::new();
        let mut order = Vec::with_capacity(items.len());
        for &index in by_name.values() {
            self.visit(index, items, &by_name, &mut state, &mut stack, &mut order)?;
        }
        drop(by_name);

        let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
        items.extend(order.into_iter().filter_map(|index| slots[index].take()));
        Ok(())
    }

    fn visit<T: Orderable>(
        &self,
        index: usize,
        items: &[T],
        by_name: &BTreeMap<&str, usize>,
        state: &mut [Visit],
        stack: &mut Vec<usize>,
        order: &mut Vec<usize>,
    ) -> Result<()> {
        match state[index] {
            Visit::Done => return Ok(()),
            Visit::InProgress => {
                let start = stack.iter().position(|&i| i == index).unwrap_or(0);
                let mut cycle: Vec<&str> = stack[start..].iter().map(|&i| items[i].name()).collect();
                cycle.push(items[index].name());
                return Err(Error::CircularDependency {
                    kind: self.kind.clone(),
                    cycle: cycle.join(" -> "),
                });
            }
            Visit::Pending => {}
        }

        state[index] = Visit::InProgress;
        stack.push(index);
        for dependency in items[index].after() {
            if let Some(&next) = by_name.get(dependency.as_str()) {
                self.visit(next, items, by_name, state, stack, order)?;
            }
        }
        stack.pop();
        state[index] = Visit::Done;
        order.push(index);
        Ok(())
    }
}
