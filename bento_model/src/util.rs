// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between kurbo rectangles and index regions, plus the padded
//! overlap predicate shared by every solver.

use bento_index::Region;
use kurbo::Rect;

/// Convert a kurbo rectangle into an index region.
#[inline]
pub(crate) fn rect_to_region(r: Rect) -> Region {
    Region::new(r.x0, r.y0, r.x1, r.y1)
}

/// Whether `a`, padded by `padding` on every side, overlaps `b`.
///
/// Padding by the layout gap turns this into the settled-state invariant
/// check: two frames separated by exactly the gap touch the padded edge and
/// do not overlap; anything closer does.
#[inline]
pub(crate) fn frames_overlap(a: Rect, b: Rect, padding: f64) -> bool {
    rect_to_region(a)
        .inflate(padding, padding)
        .intersects(&rect_to_region(b))
}

/// Warn about a recoverable consistency fault.
///
/// Forwards to `tracing::warn!` when the `tracing` feature is enabled and
/// compiles to nothing (while still borrowing its arguments) otherwise.
macro_rules! consistency_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        {
            tracing::warn!($($arg)*);
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}
pub(crate) use consistency_warn;
