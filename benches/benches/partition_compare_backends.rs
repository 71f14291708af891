// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::hash::{Hash, Hasher};

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_partition::{Bounded, HashGrid, Partitioning, QuadTree, Rect};

#[derive(Clone, Copy, Debug)]
struct Body {
    id: u32,
    rect: Rect,
}

impl PartialEq for Body {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Body {}

impl Hash for Body {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Bounded for Body {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

const WORLD: Rect = Rect::new(0.0, 0.0, 2048.0, 2048.0);
const QUERY: Rect = Rect::new(100.0, 100.0, 400.0, 400.0);

fn bodies(rects: Vec<Rect>) -> Vec<Body> {
    rects
        .into_iter()
        .enumerate()
        .map(|(i, rect)| Body { id: i as u32, rect })
        .collect()
}

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Rect::new(x as f64 * cell, y as f64 * cell, cell, cell));
        }
    }
    out
}

fn gen_overlap_grid_rects(n: usize, cell: f64, scale: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Rect::new(
                x as f64 * cell,
                y as f64 * cell,
                cell * scale,
                cell * scale,
            ));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, max_w: f64, max_h: f64, rect_w: f64, rect_h: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (max_w - rect_w).max(1.0);
        let y0 = rng.next_f64() * (max_h - rect_h).max(1.0);
        out.push(Rect::new(x0, y0, rect_w, rect_h));
    }
    out
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Rect::new(cx + dx, cy + dy, 12.0, 12.0));
        }
    }
    out
}

fn grid() -> HashGrid<Body> {
    HashGrid::new(32.0).unwrap()
}

fn tree() -> QuadTree<Body> {
    QuadTree::new(WORLD, 8, 8).unwrap()
}

/// Insert everything, then run one window query.
fn insert_query<P: Partitioning<Body>>(mut p: P, items: &[Body]) -> usize {
    for item in items {
        let _ = p.insert(*item);
    }
    p.query(QUERY).len()
}

fn bench_insert_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_query");
    for &n in &[32usize, 64] {
        let items = bodies(gen_grid_rects(n, 10.0));
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("hashgrid_n{}", n), |b| {
            b.iter_batched(grid, |g| black_box(insert_query(g, &items)), BatchSize::SmallInput)
        });
        group.bench_function(format!("quadtree_n{}", n), |b| {
            b.iter_batched(tree, |t| black_box(insert_query(t, &items)), BatchSize::SmallInput)
        });
    }
    let items = bodies(gen_overlap_grid_rects(64, 10.0, 3.0));
    group.bench_function("hashgrid_overlap", |b| {
        b.iter_batched(grid, |g| black_box(insert_query(g, &items)), BatchSize::SmallInput)
    });
    group.bench_function("quadtree_overlap", |b| {
        b.iter_batched(tree, |t| black_box(insert_query(t, &items)), BatchSize::SmallInput)
    });
    group.finish();
}

fn bench_clustered(c: &mut Criterion) {
    let mut group = c.benchmark_group("clustered");
    let items = bodies(gen_clustered_rects(16, 256, 120.0));
    group.bench_function("hashgrid", |b| {
        b.iter_batched(grid, |g| black_box(insert_query(g, &items)), BatchSize::SmallInput)
    });
    group.bench_function("quadtree", |b| {
        b.iter_batched(tree, |t| black_box(insert_query(t, &items)), BatchSize::SmallInput)
    });
    group.finish();
}

/// Every body drifts a little each frame and is re-synced.
fn update_frame<P: Partitioning<Body>>(p: &mut P, items: &mut [Body], dx: f64) {
    for item in items.iter_mut() {
        item.rect.x = (item.rect.x + dx).rem_euclid(WORLD.width - item.rect.width);
        let _ = p.update(*item);
    }
}

fn bench_update_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_heavy");
    let base = bodies(gen_random_rects(4096, 2000.0, 2000.0, 12.0, 12.0));
    group.throughput(Throughput::Elements(base.len() as u64));

    let mut g = grid();
    let mut items_g = base.clone();
    for item in &items_g {
        let _ = g.insert(*item);
    }
    group.bench_function("hashgrid", |b| {
        b.iter(|| {
            update_frame(&mut g, &mut items_g, 3.0);
            black_box(g.query(QUERY).len());
        })
    });

    let mut t = tree();
    let mut items_t = base;
    for item in &items_t {
        let _ = t.insert(*item);
    }
    group.bench_function("quadtree", |b| {
        b.iter(|| {
            update_frame(&mut t, &mut items_t, 3.0);
            black_box(t.query(QUERY).len());
        })
    });
    group.finish();
}

fn bench_query_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_heavy");
    let items = bodies(gen_random_rects(8192, 2000.0, 2000.0, 8.0, 8.0));
    let mut rng = Rng::new(0x1234_5678_9ABC_DEF0);
    let windows: Vec<Rect> = (0..256)
        .map(|_| Rect::new(rng.next_f64() * 1800.0, rng.next_f64() * 1800.0, 64.0, 64.0))
        .collect();

    let mut g = grid();
    let mut t = tree();
    for item in &items {
        let _ = g.insert(*item);
        let _ = t.insert(*item);
    }
    group.throughput(Throughput::Elements(windows.len() as u64));
    group.bench_function("hashgrid", |b| {
        b.iter(|| {
            let hits: usize = windows.iter().map(|w| g.query(*w).len()).sum();
            black_box(hits);
        })
    });
    group.bench_function("quadtree", |b| {
        b.iter(|| {
            let hits: usize = windows.iter().map(|w| t.query(*w).len()).sum();
            black_box(hits);
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_insert_query,
    bench_clustered,
    bench_update_heavy,
    bench_query_heavy,
);
criterion_main!(benches);
