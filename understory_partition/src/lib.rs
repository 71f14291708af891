// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Partition: dynamic 2D spatial partitioning for broad-phase queries.
//!
//! Understory Partition answers "which items might overlap this region?" for
//! collections of moving, axis-aligned items.
//!
//! - Track any type implementing [`Bounded`] by value; the item itself is the key.
//! - Query by rectangle or by point and receive a [`Set`] of candidate items.
//! - Re-sync moved items with [`Partitioning::update`].
//! - Inspect occupied cells or nodes with [`Partitioning::partitions`] for debugging.
//!
//! Results are candidates, not exact hits: an item is reported when any cell or
//! node it occupies intersects the query. Follow up with an exact shape test
//! when precision matters.
//!
//! Two backends implement the [`Partitioning`] contract:
//!
//! - [`HashGrid`]: an unbounded uniform grid hashed by integer cell key. Cheap to
//!   update and a good fit when items are roughly the size of a cell.
//! - [`QuadTree`]: an adaptive tree over a fixed domain. Leaves split when they
//!   fill up and collapse again when items leave; freed nodes are pooled.
//!
//! [`Partition`] wraps either one when the choice is made at runtime, usually
//! from a [`PartitionConfig`].
//!
//! # Example
//!
//! ```rust
//! use understory_partition::{Bounded, HashGrid, Partitioning, Rect};
//!
//! #[derive(Clone, Debug, PartialEq, Eq, Hash)]
//! struct Sprite {
//!     id: u32,
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Bounded for Sprite {
//!     fn bounds(&self) -> Rect {
//!         Rect::new(f64::from(self.x), f64::from(self.y), 8.0, 8.0)
//!     }
//! }
//!
//! let mut grid = HashGrid::new(32.0).unwrap();
//! grid.insert(Sprite { id: 1, x: 4, y: 4 }).unwrap();
//! grid.insert(Sprite { id: 2, x: 100, y: 100 }).unwrap();
//!
//! let hits = grid.query(Rect::new(0.0, 0.0, 16.0, 16.0));
//! assert_eq!(hits.len(), 1);
//! assert!(hits.iter().any(|s| s.id == 1));
//! ```
//!
//! Choosing the backend from configuration:
//!
//! ```rust
//! use understory_partition::{Bounded, PartitionConfig, Partitioning, QuadTreeConfig, Rect};
//!
//! #[derive(Clone, Debug, PartialEq, Eq, Hash)]
//! struct Tile(u8, u8);
//!
//! impl Bounded for Tile {
//!     fn bounds(&self) -> Rect {
//!         Rect::new(f64::from(self.0) * 16.0, f64::from(self.1) * 16.0, 16.0, 16.0)
//!     }
//! }
//!
//! let config = PartitionConfig::from(
//!     QuadTreeConfig::default()
//!         .with_bounds(Rect::new(0.0, 0.0, 4096.0, 4096.0))
//!         .with_leaf_size(4),
//! );
//! let mut tiles = config.build().unwrap();
//! for x in 0..8 {
//!     tiles.insert(Tile(x, 0)).unwrap();
//! }
//! assert_eq!(tiles.len(), 8);
//!
//! // Candidates come from the leaf holding the point, so neighbours may tag along.
//! let near = tiles.query_point(20.0, 4.0);
//! assert!(near.contains(&&Tile(1, 0)));
//! assert!(!near.contains(&&Tile(7, 0)));
//! ```
//!
//! ## Identity
//!
//! Items are compared with `Eq` and `Hash`, so those impls decide what "the same
//! item" means. Most callers key on an id and ignore position, which lets a
//! moved copy of an item be passed to [`Partitioning::update`] or
//! [`Partitioning::remove`]. Bounds are sampled on insert and update; a moved
//! item stays indexed at its old position until it is updated.
//!
//! ### Float semantics
//!
//! Coordinates are `f64`. Rectangles are half-open (`[min, max)`), so two
//! rectangles sharing only an edge do not intersect. Non-finite coordinates
//! are not supported.

pub mod backends;
pub mod config;
pub mod error;
mod items;
pub mod partitioning;
pub mod set;
pub mod types;

pub use backends::hashgrid::{CellKey, HashGrid};
pub use backends::quadtree::{NodeInfo, QuadTree};
pub use config::{GridConfig, PartitionConfig, QuadTreeConfig};
pub use error::PartitionError;
pub use partitioning::{Partition, Partitioning};
pub use set::Set;
pub use types::{Bounded, Point, Rect};
