// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain f64 axis-aligned regions.

/// Axis-aligned rectangle in container coordinates, origin top-left.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    /// Minimum x (leading edge).
    pub min_x: f64,
    /// Minimum y (top edge).
    pub min_y: f64,
    /// Maximum x (trailing edge).
    pub max_x: f64,
    /// Maximum y (bottom edge).
    pub max_y: f64,
}

impl Region {
    /// Create a region from min/max corners.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a region from origin and size.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }

    /// Width of the region. Negative when inverted.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the region. Negative when inverted.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when the region has no area (empty or inverted). Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }

    /// Whether two regions overlap with positive area.
    ///
    /// Edge-touching regions do not overlap: a pair separated by exactly the
    /// layout gap passes the padded test.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// The smallest region covering both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Expand the region by `dx`/`dy` on each side.
    pub fn inflate(&self, dx: f64, dy: f64) -> Self {
        Self {
            min_x: self.min_x - dx,
            min_y: self.min_y - dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }
}
