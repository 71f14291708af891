// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations of [`Partitioning`](crate::Partitioning).
//!
//! - `hashgrid`: uniform grid keyed by integer cell coordinates, unbounded in
//!   every direction. Each item is recorded in every cell its bounds overlap.
//! - `quadtree`: adaptive quadtree over a fixed domain with node pooling.
//!
//! Both backends keep one copy of each item in a side table and store compact
//! generational ids in their cells or nodes, so an item overlapping many
//! cells is never cloned more than once.
//!
//! Cell convention
//! ---------------
//! The hash grid uses floor division with half-open cells: the cell
//! `(i, j)` covers `[i * s, (i + 1) * s) × [j * s, (j + 1) * s)` for cell size
//! `s`. A rectangle covers the cells `floor(min / s) ..= ceil(max / s) - 1`
//! on each axis, so bounds ending exactly on a cell edge do not spill into
//! the next cell.

pub mod hashgrid;
pub mod quadtree;

pub use hashgrid::{CellKey, HashGrid};
pub use quadtree::{NodeInfo, QuadTree};
