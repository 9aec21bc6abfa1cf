use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use cfgmerge::model::{NamedEntry, SourceKind, SourceLocation, TreeDefinition};
use cfgmerge::{
    ConfigurationModelBuilder, ConfigurationTreeBuilder, DefinitionNode, DefinitionProperty,
    Group, NodePath, OrderableByNameListSorter, PathSegment,
};

/// A chain of entries where each depends on the previous one, shuffled.
fn chained_entries(count: usize) -> Vec<NamedEntry> {
    let mut entries: Vec<_> = (0..count)
        .map(|i| {
            let entry = NamedEntry::new(format!("m{i:04}"));
            if i == 0 {
                entry
            } else {
                entry.with_after([format!("m{:04}", i - 1)])
            }
        })
        .collect();
    entries.reverse();
    entries
}

/// Definitions creating `width` children with a few properties each.
fn wide_definitions(width: usize) -> Vec<TreeDefinition> {
    let origin = Arc::new(SourceLocation::new("g/p/m", "bench.yaml", SourceKind::Config));
    let mut parent = DefinitionNode::new();
    for i in 0..width {
        parent.add_node(
            PathSegment::new(format!("child{i}")),
            DefinitionNode::new()
                .with_property(DefinitionProperty::string("title", format!("Child {i}")))
                .with_property(DefinitionProperty::string("kind", "bench")),
        );
    }
    let overrides: Vec<_> = (0..width)
        .step_by(2)
        .map(|i| {
            TreeDefinition::new(
                Arc::clone(&origin),
                NodePath::parse(&format!("/root/child{i}")).unwrap(),
                DefinitionNode::new()
                    .with_property(DefinitionProperty::string("title", format!("Override {i}"))),
            )
        })
        .collect();

    let mut definitions = vec![TreeDefinition::new(
        Arc::clone(&origin),
        NodePath::parse("/root").unwrap(),
        parent,
    )];
    definitions.extend(overrides);
    definitions
}

fn sns_definitions(count: usize) -> TreeDefinition {
    let origin = Arc::new(SourceLocation::new("g/p/m", "sns.yaml", SourceKind::Config));
    let mut parent = DefinitionNode::new();
    for i in 1..=count {
        parent.add_node(PathSegment::indexed("item", i), DefinitionNode::new());
    }
    TreeDefinition::new(origin, NodePath::parse("/list").unwrap(), parent)
}

fn bench_sorter(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorter");
    let sorter = OrderableByNameListSorter::new("module");

    for count in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("chain", count), &count, |b, &count| {
            b.iter_batched(
                || chained_entries(count),
                |mut entries| sorter.sort(black_box(&mut entries)).unwrap(),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_tree_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_builder");

    for width in [10, 100, 1000] {
        let definitions = wide_definitions(width);
        group.bench_with_input(BenchmarkId::new("wide", width), &definitions, |b, defs| {
            b.iter(|| {
                let mut builder = ConfigurationTreeBuilder::new();
                for definition in defs {
                    builder.push(black_box(definition)).unwrap();
                }
                builder.build()
            });
        });
    }

    // Deleting the first sibling renames every later one
    let sns = sns_definitions(200);
    let delete_first = TreeDefinition::new(
        Arc::clone(sns.origin()),
        NodePath::parse("/list/item").unwrap(),
        DefinitionNode::deleted(),
    );
    group.bench_function("sns_delete_first", |b| {
        b.iter(|| {
            let mut builder = ConfigurationTreeBuilder::new();
            builder.push(&sns).unwrap();
            builder.push(black_box(&delete_first)).unwrap();
            builder.build()
        });
    });

    group.finish();
}

fn bench_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("model");

    group.bench_function("fifty_modules", |b| {
        b.iter_batched(
            || {
                let mut g = Group::new("g");
                let project = g.add_project("p");
                for i in 0..50 {
                    let module = project.add_module(format!("m{i:02}")).unwrap();
                    if i > 0 {
                        module.add_after([format!("m{:02}", i - 1)]);
                    }
                    module.add_config_source("main.yaml").add_config_definition(
                        NodePath::parse(&format!("/m{i:02}")).unwrap(),
                        DefinitionNode::new().with_property(DefinitionProperty::string("i", i.to_string())),
                    );
                }
                g
            },
            |g| {
                let mut builder = ConfigurationModelBuilder::new();
                builder.add_group(g).unwrap();
                builder.build().unwrap()
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_sorter, bench_tree_builder, bench_model);
criterion_main!(benches);
