//! Property-based tests for node paths.

use super::relationship::PathRelationship;
use super::types::{NodePath, PathSegment};
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = PathSegment> {
    ("[a-z][a-z0-9:_-]{0,10}", prop::option::of(1usize..5)).prop_map(|(name, index)| {
        match index {
            Some(index) => PathSegment::indexed(name, index),
            None => PathSegment::new(name),
        }
    })
}

fn path_strategy() -> impl Strategy<Value = NodePath> {
    prop::collection::vec(segment_strategy(), 0..6).prop_map(NodePath::from_segments)
}

proptest! {
    // Display output parses back to an equal path
    #[test]
    fn path_display_parses_back(path in path_strategy()) {
        let text = path.to_string();
        let parsed = NodePath::parse(&text).unwrap();
        prop_assert_eq!(parsed.to_string(), text);
        prop_assert_eq!(parsed, path);
    }

    // Path relationship is reflexive
    #[test]
    fn path_relationship_reflexive(path in path_strategy()) {
        prop_assert_eq!(PathRelationship::between(&path, &path), PathRelationship::Same);
    }

    // Ancestor and descendant are mirror images
    #[test]
    fn path_relationship_antisymmetric(a in path_strategy(), b in path_strategy()) {
        let forward = PathRelationship::between(&a, &b);
        let backward = PathRelationship::between(&b, &a);
        let expected = match forward {
            PathRelationship::Ancestor => PathRelationship::Descendant,
            PathRelationship::Descendant => PathRelationship::Ancestor,
            other => other,
        };
        prop_assert_eq!(backward, expected);
    }

    // Every proper prefix of a path is an ancestor of it
    #[test]
    fn path_prefixes_are_ancestors(path in path_strategy()) {
        for depth in 0..path.depth() {
            prop_assert!(PathRelationship::is_proper_ancestor(&path.prefix(depth), &path));
        }
    }
}
