// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and the bounded-item contract.
//!
//! Rectangles use a half-open convention: the minimum edges are inside,
//! the maximum edges are outside. Two rectangles that only share an edge
//! do not intersect. Both backends assign items to cells and nodes with
//! exactly this test, so it must not drift.

use core::hash::{Hash, Hasher};
use core::ops::{Add, Div, Mul, Sub};

/// A value that occupies an axis-aligned region of the plane.
///
/// Implementors are tracked by identity (`Eq + Hash`), so identity must not
/// depend on position. The bounds are sampled only when the item is passed to
/// `insert` or `update`; moving an item without calling `update` leaves the
/// index describing its old position.
pub trait Bounded {
    /// The item's current axis-aligned bounding box.
    fn bounds(&self) -> Rect;
}

impl<B: Bounded + ?Sized> Bounded for &B {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

/// A point (or vector) in 2D.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate (grows downward).
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance from the origin.
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Distance from the origin.
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or [`Point::ZERO`] for the zero vector.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 { Self::ZERO } else { self / len }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// Axis-aligned rectangle given by its origin (min corner) and size.
///
/// Equality is by value. `Rect` is also `Eq + Hash` so partitions can be
/// collected into a [`Set`](crate::Set); this assumes coordinates are never NaN.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Minimum x (left).
    pub x: f64,
    /// Minimum y (top).
    pub y: f64,
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from origin and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle spanning two corners.
    pub fn from_min_max(min: Point, max: Point) -> Self {
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Minimum corner.
    pub const fn min(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Maximum corner.
    pub fn max(&self) -> Point {
        Point::new(self.max_x(), self.max_y())
    }

    /// Right edge.
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Extent along x.
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Extent along y.
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Area, or zero for empty rectangles.
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.width * self.height
        }
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// True if the rectangle has no positive area. NaN sizes count as empty.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Whether `(x, y)` lies inside, with min edges inclusive and max edges exclusive.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.max_x() && y >= self.y && y < self.max_y()
    }

    /// Whether the two rectangles overlap on both axes.
    ///
    /// Rectangles that only touch along an edge or a corner do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.max_x()
            && self.max_x() > other.x
            && self.y < other.max_y()
            && self.max_y() > other.y
    }

    /// The four equal quadrants, in NW, NE, SW, SE order.
    pub fn quadrants(&self) -> [Self; 4] {
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        [
            Self::new(self.x, self.y, hw, hh),
            Self::new(self.x + hw, self.y, hw, hh),
            Self::new(self.x, self.y + hh, hw, hh),
            Self::new(self.x + hw, self.y + hh, hw, hh),
        ]
    }
}

impl Eq for Rect {}

impl Hash for Rect {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in [self.x, self.y, self.width, self.height] {
            canonical_bits(v).hash(state);
        }
    }
}

// `0.0 == -0.0`, so both must hash alike.
#[inline]
fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 { 0 } else { v.to_bits() }
}

#[cfg(feature = "kurbo")]
mod kurbo_interop {
    use super::{Point, Rect};

    impl From<kurbo::Rect> for Rect {
        fn from(r: kurbo::Rect) -> Self {
            let r = r.abs();
            Self::new(r.x0, r.y0, r.width(), r.height())
        }
    }

    impl From<Rect> for kurbo::Rect {
        fn from(r: Rect) -> Self {
            Self::new(r.x, r.y, r.max_x(), r.max_y())
        }
    }

    impl From<kurbo::Point> for Point {
        fn from(p: kurbo::Point) -> Self {
            Self::new(p.x, p.y)
        }
    }

    impl From<Point> for kurbo::Point {
        fn from(p: Point) -> Self {
            Self::new(p.x, p.y)
        }
    }
}
