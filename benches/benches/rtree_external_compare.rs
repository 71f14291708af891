// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_partition::{HashGrid, Partitioning, QuadTree, Rect};

use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Rect::new(x as f64 * cell, y as f64 * cell, cell, cell));
        }
    }
    out
}

/// Rectangle keyed by its position in the generated list.
#[derive(Clone, Copy, Debug)]
struct Placed {
    id: u32,
    rect: Rect,
}

impl PartialEq for Placed {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Placed {}

impl std::hash::Hash for Placed {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl understory_partition::Bounded for Placed {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

fn placed(rects: &[Rect]) -> Vec<Placed> {
    rects
        .iter()
        .enumerate()
        .map(|(i, rect)| Placed {
            id: i as u32,
            rect: *rect,
        })
        .collect()
}

fn to_rstar_rects(v: &[Rect]) -> Vec<GeomWithData<Rectangle<[f64; 2]>, u32>> {
    v.iter()
        .enumerate()
        .map(|(i, r)| {
            GeomWithData::new(
                Rectangle::from_corners([r.x, r.y], [r.max_x(), r.max_y()]),
                i as u32,
            )
        })
        .collect()
}

fn bench_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("external_compare_f64");
    for &n in &[64usize, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let items = placed(&rects);
        let query = Rect::new(100.0, 100.0, 400.0, 400.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("hashgrid_build_query_n{}", n), |b| {
            b.iter_batched(
                || HashGrid::new(32.0).unwrap(),
                |mut g| {
                    for item in &items {
                        let _ = g.insert(*item);
                    }
                    black_box(g.query(query).len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("quadtree_build_query_n{}", n), |b| {
            b.iter_batched(
                || QuadTree::new(Rect::new(0.0, 0.0, 1280.0, 1280.0), 8, 8).unwrap(),
                |mut t| {
                    for item in &items {
                        let _ = t.insert(*item);
                    }
                    black_box(t.query(query).len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let mut tree = RTree::new();
                    for r in rectangles {
                        tree.insert(r);
                    }
                    let aabb = AABB::from_corners([query.x, query.y], [query.max_x(), query.max_y()]);
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_external_compare);
criterion_main!(benches);
