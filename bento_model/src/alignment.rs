// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alignment guides: candidate coordinates from static items and
//! nearest-snap frame computation.

use kurbo::Rect;

use crate::hinder::Axis;
use crate::solver::ResizeAnchor;

/// A coordinate an item edge or center can snap to.
///
/// `Horizontal` guides pin an x coordinate and render as vertical lines;
/// `Vertical` guides pin a y coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AlignmentGuide {
    /// Axis the pinned coordinate lives on.
    pub axis: Axis,
    /// The pinned coordinate.
    pub value: f64,
}

/// Which of a frame's three positions on an axis matched a guide.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FrameEdge {
    /// Min edge (leading / top).
    Leading,
    /// Midpoint.
    Center,
    /// Max edge (trailing / bottom).
    Trailing,
}

/// A candidate coordinate within threshold of a frame position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AlignmentMatch {
    /// Axis of the matched coordinate.
    pub axis: Axis,
    /// The frame position that matched.
    pub edge: FrameEdge,
    /// The guide coordinate.
    pub target: f64,
    /// `target - position`: the translation that locks the edge on.
    pub offset: f64,
}

/// Candidate alignment coordinates harvested from every static item.
///
/// Rebuilt whenever the static set changes (the item being dragged or
/// resized is excluded so it cannot snap to itself).
#[derive(Clone, Debug, Default)]
pub(crate) struct AlignmentCatalog {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

fn positions(frame: Rect, axis: Axis) -> [(FrameEdge, f64); 3] {
    let (lo, hi) = crate::hinder::span(frame, axis);
    [
        (FrameEdge::Leading, lo),
        (FrameEdge::Center, 0.5 * (lo + hi)),
        (FrameEdge::Trailing, hi),
    ]
}

impl AlignmentCatalog {
    /// Re-harvest `{min, mid, max}` per axis from the given frames.
    pub(crate) fn rebuild(&mut self, frames: impl Iterator<Item = Rect>) {
        self.xs.clear();
        self.ys.clear();
        for f in frames {
            self.xs.extend([f.x0, 0.5 * (f.x0 + f.x1), f.x1]);
            self.ys.extend([f.y0, 0.5 * (f.y0 + f.y1), f.y1]);
        }
        self.xs.sort_by(f64::total_cmp);
        self.xs.dedup();
        self.ys.sort_by(f64::total_cmp);
        self.ys.dedup();
    }

    fn coords(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::Horizontal => &self.xs,
            Axis::Vertical => &self.ys,
        }
    }

    /// Every (axis, edge, coordinate) combination within `threshold`.
    pub(crate) fn available_alignments(&self, frame: Rect, threshold: f64) -> Vec<AlignmentMatch> {
        let mut out = Vec::new();
        for axis in [Axis::Horizontal, Axis::Vertical] {
            for &target in self.coords(axis) {
                for (edge, pos) in positions(frame, axis) {
                    let offset = target - pos;
                    if offset.abs() <= threshold {
                        out.push(AlignmentMatch {
                            axis,
                            edge,
                            target,
                            offset,
                        });
                    }
                }
            }
        }
        out
    }

    /// The match with the smallest absolute offset on `axis`, restricted to
    /// `edges`. Ties resolve to the first candidate seen (strict `<`).
    fn best_match(
        &self,
        frame: Rect,
        axis: Axis,
        threshold: f64,
        edges: &[FrameEdge],
    ) -> Option<AlignmentMatch> {
        let mut best: Option<AlignmentMatch> = None;
        for &target in self.coords(axis) {
            for (edge, pos) in positions(frame, axis) {
                if !edges.contains(&edge) {
                    continue;
                }
                let offset = target - pos;
                if offset.abs() > threshold {
                    continue;
                }
                if best.is_none_or(|b| offset.abs() < b.offset.abs()) {
                    best = Some(AlignmentMatch {
                        axis,
                        edge,
                        target,
                        offset,
                    });
                }
            }
        }
        best
    }

    /// Nearest snapped frame for a whole-frame move: per axis, the best
    /// match translates the frame. `None` when neither axis matches.
    pub(crate) fn snap_translated(&self, frame: Rect, threshold: f64) -> Option<Rect> {
        const ALL: [FrameEdge; 3] = [FrameEdge::Leading, FrameEdge::Center, FrameEdge::Trailing];
        let x = self.best_match(frame, Axis::Horizontal, threshold, &ALL);
        let y = self.best_match(frame, Axis::Vertical, threshold, &ALL);
        if x.is_none() && y.is_none() {
            return None;
        }
        let dx = x.map_or(0.0, |m| m.offset);
        let dy = y.map_or(0.0, |m| m.offset);
        Some(Rect::new(
            frame.x0 + dx,
            frame.y0 + dy,
            frame.x1 + dx,
            frame.y1 + dy,
        ))
    }

    /// Nearest snapped frame for a resize: only the anchor's moving edges
    /// are eligible, and the matched edge moves alone.
    pub(crate) fn snap_resized(
        &self,
        frame: Rect,
        anchor: ResizeAnchor,
        threshold: f64,
    ) -> Option<Rect> {
        let edge = match anchor {
            ResizeAnchor::TopLeading => FrameEdge::Leading,
            ResizeAnchor::BottomTrailing => FrameEdge::Trailing,
        };
        let x = self.best_match(frame, Axis::Horizontal, threshold, &[edge]);
        let y = self.best_match(frame, Axis::Vertical, threshold, &[edge]);
        if x.is_none() && y.is_none() {
            return None;
        }
        let mut out = frame;
        if let Some(m) = x {
            match edge {
                FrameEdge::Leading => out.x0 = m.target,
                _ => out.x1 = m.target,
            }
        }
        if let Some(m) = y {
            match edge {
                FrameEdge::Leading => out.y0 = m.target,
                _ => out.y1 = m.target,
            }
        }
        Some(out)
    }

    /// Guides a committed frame sits exactly on, for rendering.
    pub(crate) fn guides_for(&self, frame: Rect, tolerance: f64) -> Vec<AlignmentGuide> {
        let mut out: Vec<AlignmentGuide> = Vec::new();
        for m in self.available_alignments(frame, tolerance) {
            let guide = AlignmentGuide {
                axis: m.axis,
                value: m.target,
            };
            if !out.contains(&guide) {
                out.push(guide);
            }
        }
        out
    }
}
