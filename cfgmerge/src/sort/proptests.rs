//! Property-based tests for the sorters.

use std::collections::HashMap;

use proptest::prelude::*;

use super::OrderableByNameListSorter;
use crate::model::{NamedEntry, Orderable};

// Acyclic by construction: entry `i` may only depend on entries `< i`.
fn acyclic_entries() -> impl Strategy<Value = Vec<NamedEntry>> {
    (1usize..12)
        .prop_flat_map(|count| {
            prop::collection::vec(prop::collection::vec(any::<prop::sample::Index>(), 0..3), count)
        })
        .prop_map(|dependencies| {
            dependencies
                .iter()
                .enumerate()
                .map(|(i, deps)| {
                    let after: Vec<String> = if i == 0 {
                        Vec::new()
                    } else {
                        deps.iter().map(|d| format!("e{:02}", d.index(i))).collect()
                    };
                    NamedEntry::new(format!("e{i:02}")).with_after(after)
                })
                .collect()
        })
}

proptest! {
    // Sorting is independent of input order
    #[test]
    fn sort_is_deterministic_under_shuffling(
        (entries, shuffled) in acyclic_entries()
            .prop_flat_map(|entries| (Just(entries.clone()), Just(entries).prop_shuffle()))
    ) {
        let sorter = OrderableByNameListSorter::new("entry");
        let mut a = entries;
        let mut b = shuffled;
        sorter.sort(&mut a).unwrap();
        sorter.sort(&mut b).unwrap();
        prop_assert_eq!(a, b);
    }

    // Every entry comes after all of its dependencies
    #[test]
    fn sort_respects_after(entries in acyclic_entries()) {
        let mut sorted = entries;
        OrderableByNameListSorter::new("entry").sort(&mut sorted).unwrap();
        let position: HashMap<&str, usize> = sorted
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name(), i))
            .collect();
        for entry in &sorted {
            for dependency in entry.after() {
                prop_assert!(position[dependency.as_str()] < position[entry.name()]);
            }
        }
    }
}
