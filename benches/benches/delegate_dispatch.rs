// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_delegate::registry::DelegationRegistry;
use trellis_delegate::types::HandlerRef;
use trellis_dom::{ElementData, Event, NodeId, Tree};

/// Root section holding `rows` list items, each wrapping a span the events
/// target. Returns the root and the deepest span of the last row.
fn build_list(rows: usize) -> (Tree, NodeId, NodeId) {
    let mut tree = Tree::new();
    let root = tree.insert(None, ElementData::new("section").with_id("app"));
    let list = tree.insert(Some(root), ElementData::new("ul").with_class("rows"));
    let mut last_span = list;
    for i in 0..rows {
        let class = if i % 2 == 0 { "even" } else { "odd" };
        let item = tree.insert(
            Some(list),
            ElementData::new("li").with_class("item").with_class(class),
        );
        last_span = tree.insert(Some(item), ElementData::new("span"));
    }
    (tree, root, last_span)
}

/// Chain of `depth` nested divs under the root, none matching the selector
/// until the outermost wrapper. Stresses the ancestor walk.
fn build_deep(depth: usize) -> (Tree, NodeId, NodeId) {
    let mut tree = Tree::new();
    let root = tree.insert(None, ElementData::new("section"));
    let wrapper = tree.insert(Some(root), ElementData::new("div").with_class("wrap"));
    let mut cur = wrapper;
    for _ in 0..depth {
        cur = tree.insert(Some(cur), ElementData::new("div"));
    }
    (tree, root, cur)
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("delegate_dispatch");

    for rows in [16_usize, 256] {
        let (mut tree, root, span) = build_list(rows);
        let mut reg = DelegationRegistry::new();
        reg.set_root(&mut tree, root).unwrap();
        let h: HandlerRef<Tree> = HandlerRef::new(|_, _, node| {
            black_box(node);
        });
        reg.add(&mut tree, "click", "li.item", &h, None).unwrap();

        group.throughput(Throughput::Elements(1));
        group.bench_function(format!("list_rows_{rows}"), |b| {
            b.iter(|| tree.dispatch_event(black_box(&Event::new("click", span))));
        });
    }

    for depth in [8_usize, 64] {
        let (mut tree, root, leaf) = build_deep(depth);
        let mut reg = DelegationRegistry::new();
        reg.set_root(&mut tree, root).unwrap();
        let h: HandlerRef<Tree> = HandlerRef::new(|_, _, node| {
            black_box(node);
        });
        reg.add(&mut tree, "click", "div.wrap", &h, None).unwrap();

        group.throughput(Throughput::Elements(1));
        group.bench_function(format!("walk_depth_{depth}"), |b| {
            b.iter(|| tree.dispatch_event(black_box(&Event::new("click", leaf))));
        });
    }

    group.finish();
}

fn bench_add_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("delegate_bindings");

    group.bench_function("add_remove_all_32", |b| {
        b.iter_batched(
            || {
                let (mut tree, root, _) = build_list(8);
                let mut reg = DelegationRegistry::new();
                reg.set_root(&mut tree, root).unwrap();
                (tree, reg)
            },
            |(mut tree, mut reg)| {
                let h: HandlerRef<Tree> = HandlerRef::new(|_, _, _| {});
                for i in 0..32 {
                    let ty = if i % 2 == 0 { "click" } else { "focus" };
                    reg.add(&mut tree, ty, "li.item", &h, None).unwrap();
                }
                reg.remove_all(&mut tree).unwrap();
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_add_remove);
criterion_main!(benches);
