// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_dom::ElementData;
use trellis_select::Selector;

const SELECTORS: &[&str] = &[
    "li",
    "li.item",
    "ul#list li", // parse error path: combinators are refused
    "input[type=checkbox].toggle",
    ".a.b.c, #main, article[data-open]",
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_parse");
    group.throughput(Throughput::Elements(SELECTORS.len() as u64));
    group.bench_function("mixed_list", |b| {
        b.iter(|| {
            for s in SELECTORS {
                let _ = black_box(Selector::parse(black_box(s)));
            }
        });
    });
    group.finish();
}

fn bench_match(c: &mut Criterion) {
    let element = ElementData::new("input")
        .with_id("agree")
        .with_class("toggle")
        .with_class("compact")
        .with_attr("type", "checkbox");
    let hit = Selector::parse("input[type=checkbox].toggle").unwrap();
    let miss = Selector::parse("li.item, button.toggle").unwrap();

    let mut group = c.benchmark_group("select_match");
    group.throughput(Throughput::Elements(1));
    group.bench_function("compound_hit", |b| {
        b.iter(|| black_box(hit.matches(black_box(&element))));
    });
    group.bench_function("list_miss", |b| {
        b.iter(|| black_box(miss.matches(black_box(&element))));
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_match);
criterion_main!(benches);
