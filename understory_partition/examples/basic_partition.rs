// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory Partition: insert, move, query, and inspect cells.

use understory_partition::{Bounded, HashGrid, Partitioning, Rect};

#[derive(Clone, Debug)]
struct Ball {
    id: u32,
    x: f64,
    y: f64,
}

impl PartialEq for Ball {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Ball {}

impl core::hash::Hash for Ball {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Bounded for Ball {
    fn bounds(&self) -> Rect {
        Rect::new(self.x - 5.0, self.y - 5.0, 10.0, 10.0)
    }
}

fn main() {
    let mut grid = HashGrid::new(32.0).expect("valid cell size");
    grid.insert(Ball { id: 1, x: 10.0, y: 10.0 }).unwrap();
    grid.insert(Ball { id: 2, x: 60.0, y: 60.0 }).unwrap();

    // Move ball 1 across a cell boundary
    grid.update(Ball { id: 1, x: 40.0, y: 10.0 }).unwrap();
    println!("cells of ball 1: {:?}", grid.cells_of(&Ball { id: 1, x: 0.0, y: 0.0 }));

    // Query a point
    let hits: Vec<_> = grid.query_point(36.0, 8.0).into_iter().map(|b| b.id).collect();
    println!("hits at (36,8): {:?}", hits);
    println!("occupied cells: {}", grid.cell_count());
}
