// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directional taxonomy and the adjacency filters behind hinder queries.
//!
//! A *hinder* is a neighboring item that blocks (or is blocked by) movement
//! or resizing of another item in a given direction. Candidate hinders come
//! from the occupancy grid; the filters here narrow a candidate set to the
//! items actually lying on the named side with overlapping cross-axis
//! projections.

use kurbo::Rect;

/// Container axis.
///
/// `Horizontal` is the x axis: horizontal alignment guides pin an x
/// coordinate (and render as vertical lines).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Side of an item, in layout terms (leading = left, origin top-left).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Above.
    Top,
    /// Below.
    Bottom,
    /// Before, along x.
    Leading,
    /// After, along x.
    Trailing,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Leading, Self::Trailing];

    /// The axis this direction moves along.
    pub const fn axis(self) -> Axis {
        match self {
            Self::Leading | Self::Trailing => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }

    /// True for the directions of increasing coordinates.
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Bottom | Self::Trailing)
    }
}

/// `(min, max)` of `frame` along `axis`.
#[inline]
pub(crate) fn span(frame: Rect, axis: Axis) -> (f64, f64) {
    match axis {
        Axis::Horizontal => (frame.x0, frame.x1),
        Axis::Vertical => (frame.y0, frame.y1),
    }
}

/// `frame`'s span along `direction`'s axis in signed coordinates, where the
/// direction of travel is positive. `lo` is the edge nearest an item
/// approaching from behind, `hi` the far edge; growth increases `hi`.
#[inline]
pub(crate) fn signed_span(frame: Rect, direction: Direction) -> (f64, f64) {
    let (lo, hi) = span(frame, direction.axis());
    if direction.is_forward() { (lo, hi) } else { (-hi, -lo) }
}

/// Rebuild `frame` with a new signed span along `direction`'s axis.
#[inline]
pub(crate) fn with_signed_span(frame: Rect, direction: Direction, lo: f64, hi: f64) -> Rect {
    let (lo, hi) = if direction.is_forward() {
        (lo, hi)
    } else {
        (-hi, -lo)
    };
    match direction.axis() {
        Axis::Horizontal => Rect::new(lo, frame.y0, hi, frame.y1),
        Axis::Vertical => Rect::new(frame.x0, lo, frame.x1, hi),
    }
}

/// Whether `other` lies on the `direction` side of `frame` with a strictly
/// overlapping cross-axis projection.
///
/// The side test orders same-axis min edges, so an item already overlapping
/// `frame` (transient mid-drag state) still counts toward the side its
/// origin is on; the consuming solver decides what to do with it.
pub(crate) fn is_adjacent(frame: Rect, other: Rect, direction: Direction) -> bool {
    let axis = direction.axis();
    let (f_lo, _) = span(frame, axis);
    let (o_lo, _) = span(other, axis);
    let on_side = if direction.is_forward() {
        o_lo > f_lo
    } else {
        o_lo < f_lo
    };
    if !on_side {
        return false;
    }
    let (f_clo, f_chi) = span(frame, axis.cross());
    let (o_clo, o_chi) = span(other, axis.cross());
    o_clo < f_chi && o_chi > f_clo
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Rect = Rect::new(100.0, 100.0, 200.0, 200.0);

    #[test]
    fn side_tests() {
        let above = Rect::new(100.0, 0.0, 200.0, 80.0);
        let below = Rect::new(100.0, 220.0, 200.0, 300.0);
        let before = Rect::new(0.0, 100.0, 80.0, 200.0);
        let after = Rect::new(220.0, 100.0, 300.0, 200.0);
        assert!(is_adjacent(FRAME, above, Direction::Top));
        assert!(!is_adjacent(FRAME, above, Direction::Bottom));
        assert!(is_adjacent(FRAME, below, Direction::Bottom));
        assert!(is_adjacent(FRAME, before, Direction::Leading));
        assert!(is_adjacent(FRAME, after, Direction::Trailing));
        assert!(!is_adjacent(FRAME, after, Direction::Leading));
    }

    #[test]
    fn cross_projection_must_overlap() {
        // Above but fully to the right: not a top hinder.
        let diagonal = Rect::new(250.0, 0.0, 350.0, 80.0);
        assert!(!is_adjacent(FRAME, diagonal, Direction::Top));
        // Touching projections do not overlap (strict test).
        let flush = Rect::new(200.0, 0.0, 300.0, 80.0);
        assert!(!is_adjacent(FRAME, flush, Direction::Top));
        // One pixel of shared projection counts.
        let nicked = Rect::new(199.0, 0.0, 300.0, 80.0);
        assert!(is_adjacent(FRAME, nicked, Direction::Top));
    }

    #[test]
    fn signed_span_round_trips() {
        for dir in Direction::ALL {
            let (lo, hi) = signed_span(FRAME, dir);
            assert!(lo < hi, "signed span must be ordered for {dir:?}");
            assert_eq!(with_signed_span(FRAME, dir, lo, hi), FRAME);
        }
    }

    #[test]
    fn signed_span_grows_with_direction() {
        // Moving the far edge outward in signed space moves the real frame
        // in the direction of travel.
        let (lo, hi) = signed_span(FRAME, Direction::Leading);
        let grown = with_signed_span(FRAME, Direction::Leading, lo, hi + 10.0);
        assert_eq!(grown.x0, FRAME.x0 - 10.0);
        assert_eq!(grown.x1, FRAME.x1);
    }
}
