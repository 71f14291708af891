// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction parameters for the partitioning backends.
//!
//! Parameters are fixed for the lifetime of a structure. Configs are plain
//! values so they can be embedded in a host's own settings; enable the
//! `serde` feature to load them from a file.

use crate::error::{PartitionError, check_domain};
use crate::partitioning::Partition;
use crate::types::{Bounded, Rect};
use crate::{HashGrid, QuadTree};

use core::hash::Hash;

/// Uniform hash grid parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Side length of each square cell.
    pub cell_size: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { cell_size: 64.0 }
    }
}

impl GridConfig {
    /// Set the cell size.
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Check the parameters without building anything.
    pub fn validate(&self) -> Result<(), PartitionError> {
        if self.cell_size.is_finite() && self.cell_size > 0.0 {
            Ok(())
        } else {
            Err(PartitionError::NonPositiveCellSize(self.cell_size))
        }
    }
}

/// Quadtree parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuadTreeConfig {
    /// Domain covered by the root node.
    pub bounds: Rect,
    /// Items a leaf may hold before it subdivides.
    pub leaf_size: usize,
    /// How many times the root may be subdivided along any path.
    pub max_depth: u32,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, 1024.0, 1024.0),
            leaf_size: 8,
            max_depth: 8,
        }
    }
}

impl QuadTreeConfig {
    /// Set the root domain.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the leaf capacity.
    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Set the subdivision depth budget.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check the parameters without building anything.
    pub fn validate(&self) -> Result<(), PartitionError> {
        if self.leaf_size == 0 {
            return Err(PartitionError::ZeroLeafSize);
        }
        check_domain(self.bounds)?;
        Ok(())
    }
}

/// Which backend to build, with its parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PartitionConfig {
    /// Uniform hash grid.
    HashGrid(GridConfig),
    /// Adaptive quadtree.
    QuadTree(QuadTreeConfig),
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self::HashGrid(GridConfig::default())
    }
}

impl From<GridConfig> for PartitionConfig {
    fn from(config: GridConfig) -> Self {
        Self::HashGrid(config)
    }
}

impl From<QuadTreeConfig> for PartitionConfig {
    fn from(config: QuadTreeConfig) -> Self {
        Self::QuadTree(config)
    }
}

impl PartitionConfig {
    /// Check the parameters of the selected backend.
    pub fn validate(&self) -> Result<(), PartitionError> {
        match self {
            Self::HashGrid(c) => c.validate(),
            Self::QuadTree(c) => c.validate(),
        }
    }

    /// Build an empty partition for items of type `T`.
    pub fn build<T>(&self) -> Result<Partition<T>, PartitionError>
    where
        T: Bounded + Eq + Hash + Clone,
    {
        Ok(match self {
            Self::HashGrid(c) => Partition::HashGrid(HashGrid::from_config(c)?),
            Self::QuadTree(c) => Partition::QuadTree(QuadTree::from_config(c)?),
        })
    }
}
