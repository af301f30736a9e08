#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::IVec3;
use grove_core::analyzer::{count_leaves, overlay_leaf_count};
use grove_core::{BlockSubstitution, LeafAnalyzer};
use grove_registry::TreeSpec;
use grove_registry::wood::{TEMPLATE_LEAVES, TEMPLATE_LOG};
use grove_utils::{BlockState, StructureTemplate};
use rustc_hash::FxHashMap;
use std::hint::black_box;

/// A roughly spherical canopy of `radius` on a straight trunk.
fn canopy_tree(radius: i32) -> StructureTemplate {
    let side = radius * 2 + 1;
    let mut template = StructureTemplate::new(IVec3::new(side, side + radius, side));
    for y in 0..radius {
        template.push_block(BlockState::new(TEMPLATE_LOG), IVec3::new(radius, y, radius));
    }
    for x in 0..side {
        for y in 0..side {
            for z in 0..side {
                let offset = IVec3::new(x - radius, y - radius, z - radius);
                if offset.length_squared() <= radius * radius {
                    template.push_block(
                        BlockState::new(TEMPLATE_LEAVES).with_property("distance", "1"),
                        IVec3::new(x, y + radius, z),
                    );
                }
            }
        }
    }
    template
}

fn bench_count_leaves(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_leaves");
    for radius in [3, 6] {
        let tree = canopy_tree(radius);
        group.bench_with_input(BenchmarkId::from_parameter(radius), &tree, |b, tree| {
            b.iter(|| black_box(count_leaves(tree)));
        });
    }
    group.finish();
}

fn bench_overlay(c: &mut Criterion) {
    let base = canopy_tree(5);
    let overlay = canopy_tree(6);

    c.bench_function("overlay_leaf_count", |b| {
        b.iter(|| black_box(overlay_leaf_count(&base, &overlay)));
    });
}

fn bench_random_tree(c: &mut Criterion) {
    let mut templates = FxHashMap::default();
    for i in 1..=35 {
        templates.insert(format!("acacia{i}"), canopy_tree(3 + i % 3));
    }
    let spec = TreeSpec::random("acacia", "acacia", 35);

    c.bench_function("random_tree_35_templates", |b| {
        let analyzer = LeafAnalyzer::new(&templates);
        b.iter(|| black_box(analyzer.analyze(&spec)));
    });
}

fn bench_substitution(c: &mut Criterion) {
    let tree = canopy_tree(6);
    let substitution = BlockSubstitution::default();

    c.bench_function("substitute_and_encode", |b| {
        b.iter(|| {
            let mut structure = tree.clone();
            substitution.apply(&mut structure, "sequoia");
            black_box(structure.to_bytes())
        });
    });
}

criterion_group!(
    benches,
    bench_count_leaves,
    bench_overlay,
    bench_random_tree,
    bench_substitution
);
criterion_main!(benches);
