//! Property-based tests for same-name-sibling handling.

use std::sync::Arc;

use proptest::prelude::*;

use super::ConfigurationTreeBuilder;
use crate::model::{
    DefinitionNode, DefinitionProperty, SourceKind, SourceLocation, TreeDefinition, Value,
};
use crate::path::{NodePath, PathSegment};

fn definition(path: NodePath, node: DefinitionNode) -> TreeDefinition {
    let origin = Arc::new(SourceLocation::new("g/p/m", "config.yaml", SourceKind::Config));
    TreeDefinition::new(origin, path, node)
}

proptest! {
    // Deleting siblings keeps indices contiguous and content in order
    #[test]
    fn sns_indices_stay_contiguous(
        count in 1usize..8,
        deletions in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let mut parent = DefinitionNode::new();
        for i in 1..=count {
            parent.add_node(
                PathSegment::indexed("sns", i),
                DefinitionNode::new().with_property(DefinitionProperty::string("id", i.to_string())),
            );
        }
        let mut builder = ConfigurationTreeBuilder::new();
        builder.push(&definition(NodePath::parse("/a").unwrap(), parent)).unwrap();

        let mut expected: Vec<String> = (1..=count).map(|i| i.to_string()).collect();
        for deletion in deletions {
            if expected.is_empty() {
                break;
            }
            let index = deletion.index(expected.len());
            let path = NodePath::parse("/a").unwrap().child(PathSegment::indexed("sns", index + 1));
            builder.push(&definition(path, DefinitionNode::deleted())).unwrap();
            expected.remove(index);
        }

        let root = builder.build();
        let a = root.child("a").unwrap();
        let children: Vec<_> = a.children().collect();
        prop_assert_eq!(children.len(), expected.len());
        for (position, child) in children.iter().enumerate() {
            prop_assert_eq!(child.sns_index(), position + 1);
            let id = child.property("id").unwrap().value().cloned();
            prop_assert_eq!(id, Some(Value::from(expected[position].clone())));
        }
    }
}
