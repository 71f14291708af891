// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy for precondition violations.
//!
//! Only programmer errors surface here. Operational non-events, such as
//! removing an item that is not tracked or inserting an item outside a
//! quadtree's domain, are reported through `bool` returns instead.

use thiserror::Error;

use crate::types::Rect;

/// A violated precondition. The failing call leaves the structure untouched.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum PartitionError {
    /// Grid cell size must be finite and strictly positive.
    #[error("cell size must be finite and positive, got {0}")]
    NonPositiveCellSize(f64),
    /// A quadtree leaf must be allowed to hold at least one item.
    #[error("leaf size must be at least 1")]
    ZeroLeafSize,
    /// A quadtree domain must have positive area.
    #[error("partition domain {0:?} has no area")]
    EmptyDomain(Rect),
    /// A quadtree domain must have finite coordinates.
    #[error("partition domain {0:?} is not finite")]
    NonFiniteDomain(Rect),
    /// An item's bounds are not finite, or their far edge does not lie past
    /// the near edge on both axes.
    #[error("item bounds {0:?} have non-positive or non-finite extent")]
    DegenerateBounds(Rect),
}

fn is_finite(r: &Rect) -> bool {
    r.x.is_finite() && r.y.is_finite() && r.max_x().is_finite() && r.max_y().is_finite()
}

/// Whether the far edges are distinct from the near ones once rounded.
///
/// A width that is tiny relative to `x` can satisfy `width > 0.0` while
/// `x + width == x`.
fn has_extent(r: &Rect) -> bool {
    r.max_x() > r.x && r.max_y() > r.y
}

/// Check that an item's bounds can be indexed.
pub(crate) fn check_item_bounds(bounds: Rect) -> Result<Rect, PartitionError> {
    if is_finite(&bounds) && has_extent(&bounds) {
        Ok(bounds)
    } else {
        Err(PartitionError::DegenerateBounds(bounds))
    }
}

/// Check that a quadtree domain can be subdivided.
pub(crate) fn check_domain(bounds: Rect) -> Result<Rect, PartitionError> {
    if !is_finite(&bounds) {
        Err(PartitionError::NonFiniteDomain(bounds))
    } else if !has_extent(&bounds) {
        Err(PartitionError::EmptyDomain(bounds))
    } else {
        Ok(bounds)
    }
}
