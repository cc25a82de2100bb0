// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-placement of new items and whole-layout rearrangement.
//!
//! Placement scans free space on a lattice whose stride is the minimum item
//! size plus the gap, the coarsest step that cannot skip over a viable slot.
//! Rearrangement is a greedy single-pass compaction: each item slides
//! straight toward the chosen edge until it rests one gap away from whatever
//! already sits there.

use kurbo::{Point, Rect, Size};

use crate::hinder::{Direction, is_adjacent};
use crate::item::{BentoItem, ItemId};
use crate::model::{BentoModel, ChangeSet, EPS};

/// Hard cap on lattice probes per placement; a scan that runs this long is
/// stuck (degenerate sizes) and gives up rather than spinning.
const MAX_PLACEMENT_PROBES: usize = 1_000_000;

/// Edge items pack toward during [`BentoModel::rearrange`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PackDirection {
    /// Slide items up against the top edge.
    Top,
    /// Slide items across against the leading edge.
    Leading,
}

impl<I: BentoItem> BentoModel<I> {
    /// First lattice origin where a `size` item fits, scanning row-major
    /// from the container origin. `None` when the item is wider than the
    /// container or the probe budget runs out; the container bottom is open
    /// so a fitting item always lands eventually.
    pub(crate) fn auto_position(&self, size: Size, exclude: Option<ItemId>) -> Option<Point> {
        if size.width > self.container_size.width + EPS {
            return None;
        }
        let cell = self.min_item_size();
        let sx = cell.width + self.gap;
        let sy = cell.height + self.gap;
        let mut probes = 0usize;
        let mut y = 0.0;
        loop {
            let mut x = 0.0;
            while x + size.width <= self.container_size.width + EPS {
                probes += 1;
                if probes > MAX_PLACEMENT_PROBES {
                    return None;
                }
                if self.can_place(Rect::from_origin_size((x, y), size), exclude) {
                    return Some(Point::new(x, y));
                }
                x += sx;
            }
            probes += 1;
            if probes > MAX_PLACEMENT_PROBES {
                return None;
            }
            y += sy;
        }
    }

    /// Compact the layout toward one edge.
    ///
    /// Items are visited sorted by their cross-axis origin, then their
    /// packing-axis origin. Each moves straight along the packing axis,
    /// keeping its other coordinate and its size, until it rests one gap
    /// from the farthest edge of the neighbors already between it and the
    /// target edge (or at the edge itself when nothing is). Single greedy
    /// pass; the result is one checkpoint.
    pub fn rearrange(&mut self, direction: PackDirection) -> ChangeSet {
        let dir = match direction {
            PackDirection::Top => Direction::Top,
            PackDirection::Leading => Direction::Leading,
        };
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        order.sort_by(|&a, &b| {
            let fa = self.items[a].frame();
            let fb = self.items[b].frame();
            let (ca, pa, cb, pb) = match direction {
                PackDirection::Top => (fa.x0, fa.y0, fb.x0, fb.y0),
                PackDirection::Leading => (fa.y0, fa.x0, fb.y0, fb.x0),
            };
            ca.total_cmp(&cb).then(pa.total_cmp(&pb))
        });

        let gap = self.gap;
        let mut change = ChangeSet::default();
        for &idx in &order {
            let frame = self.items[idx].frame();
            let mut edge = 0.0_f64;
            for (n, other) in self.items.iter().enumerate() {
                if n == idx {
                    continue;
                }
                let of = other.frame();
                if is_adjacent(frame, of, dir) {
                    let far = match direction {
                        PackDirection::Top => of.y1,
                        PackDirection::Leading => of.x1,
                    };
                    edge = edge.max(far + gap);
                }
            }
            let packed = match direction {
                PackDirection::Top => Rect::new(frame.x0, edge, frame.x1, edge + frame.height()),
                PackDirection::Leading => Rect::new(edge, frame.y0, edge + frame.width(), frame.y1),
            };
            if packed != frame {
                self.items[idx].set_frame(packed);
                change.updated.push(self.items[idx].id());
            }
        }
        self.commit_structural(&change);
        change
    }
}
