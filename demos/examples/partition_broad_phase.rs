// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partition broad phase.
//!
//! Bounce a handful of balls around a box, re-sync them every frame, and use
//! the partition to find candidate pairs before an exact overlap test.
//!
//! Run:
//! - `cargo run -p understory_examples --example partition_broad_phase`
//! - `cargo run -p understory_examples --example partition_broad_phase -- quadtree`
//!
//! Set `RUST_LOG=understory_partition=trace` to watch the quadtree split and collapse.

use std::hash::{Hash, Hasher};

use tracing_subscriber::EnvFilter;
use understory_partition::{
    Bounded, GridConfig, PartitionConfig, Partitioning, Point, QuadTreeConfig, Rect,
};

const WORLD: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);
const RADIUS: f64 = 6.0;

#[derive(Clone, Debug)]
struct Ball {
    id: u32,
    pos: Point,
    vel: Point,
}

impl PartialEq for Ball {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Ball {}

impl Hash for Ball {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Bounded for Ball {
    fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - RADIUS,
            self.pos.y - RADIUS,
            RADIUS * 2.0,
            RADIUS * 2.0,
        )
    }
}

impl Ball {
    fn step(&mut self) {
        self.pos = self.pos + self.vel;
        if self.pos.x < WORLD.x + RADIUS || self.pos.x > WORLD.max_x() - RADIUS {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < WORLD.y + RADIUS || self.pos.y > WORLD.max_y() - RADIUS {
            self.vel.y = -self.vel.y;
        }
    }

    fn touches(&self, other: &Self) -> bool {
        self.pos.distance(other.pos) < RADIUS * 2.0
    }
}

fn spawn(count: u32) -> Vec<Ball> {
    (0..count)
        .map(|id| {
            let f = f64::from(id);
            let heading = Point::new((f * 0.7).cos(), (f * 1.3).sin()).normalized();
            Ball {
                id,
                pos: Point::new(20.0 + (f * 37.0) % 360.0, 20.0 + (f * 23.0) % 260.0),
                vel: heading * 2.5,
            }
        })
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("understory_partition=debug")),
        )
        .with_target(true)
        .compact()
        .init();

    let config = match std::env::args().nth(1).as_deref() {
        Some("quadtree") => PartitionConfig::from(
            QuadTreeConfig::default()
                .with_bounds(WORLD)
                .with_leaf_size(4)
                .with_max_depth(5),
        ),
        _ => PartitionConfig::from(GridConfig::default().with_cell_size(24.0)),
    };
    let mut partition = config.build().expect("valid configuration");

    let mut balls = spawn(60);
    for ball in &balls {
        partition.insert(ball.clone()).expect("balls have positive size");
    }

    for frame in 0..30 {
        for ball in &mut balls {
            ball.step();
            partition
                .update(ball.clone())
                .expect("balls have positive size");
        }

        let mut candidates = 0;
        let mut contacts = 0;
        for ball in &balls {
            for other in partition.query(ball.bounds()) {
                // Each unordered pair once.
                if other.id <= ball.id {
                    continue;
                }
                candidates += 1;
                if ball.touches(other) {
                    contacts += 1;
                }
            }
        }
        if frame % 10 == 0 {
            tracing::info!(frame, candidates, contacts, "broad phase");
        }
    }

    let cells = partition.partitions(WORLD);
    println!(
        "{} balls tracked across {} partitions",
        partition.len(),
        cells.len()
    );
}
