// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag and resize solvers.
//!
//! Both gestures re-solve every frame from a snapshot pinned at gesture
//! start, so feeding the same translation twice is idempotent and walking a
//! translation back releases any displacement it caused. Resize compression
//! cascades through chains of hinders in a signed coordinate space where the
//! direction of travel is always positive, which collapses the four
//! directions into one code path.

use std::collections::BTreeMap;

use kurbo::{Rect, Size, Vec2};

use crate::hinder::{Axis, Direction, is_adjacent, signed_span, with_signed_span};
use crate::item::{BentoItem, ItemId};
use crate::model::{BentoModel, ChangeSet, EPS, InteractionKind};

/// Chain length at which compression stops propagating and the gesture
/// clamps instead.
const MAX_CASCADE_DEPTH: usize = 64;

/// Corner a resize gesture moves; the opposite corner stays pinned.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ResizeAnchor {
    /// The top-left corner moves; bottom-right is pinned.
    TopLeading,
    /// The bottom-right corner moves; top-left is pinned.
    BottomTrailing,
}

impl ResizeAnchor {
    /// The two directions this anchor's edges travel when growing.
    pub(crate) const fn directions(self) -> [Direction; 2] {
        match self {
            Self::TopLeading => [Direction::Leading, Direction::Top],
            Self::BottomTrailing => [Direction::Trailing, Direction::Bottom],
        }
    }
}

/// Allowed origin window for a dragged item, from the hinders around its
/// gesture-start frame.
#[derive(Copy, Clone, Debug)]
struct DragBounds {
    min_x0: f64,
    max_x0: f64,
    min_y0: f64,
    max_y0: f64,
}

fn drag_bounds<I: BentoItem>(
    origin: &[I],
    id: ItemId,
    start: Rect,
    gap: f64,
    container_w: f64,
) -> DragBounds {
    let mut b = DragBounds {
        min_x0: 0.0,
        max_x0: container_w - start.width(),
        min_y0: 0.0,
        max_y0: f64::INFINITY,
    };
    for other in origin.iter().filter(|o| o.id() != id) {
        let of = other.frame();
        if is_adjacent(start, of, Direction::Leading) {
            b.min_x0 = b.min_x0.max(of.x1 + gap);
        }
        if is_adjacent(start, of, Direction::Trailing) {
            b.max_x0 = b.max_x0.min(of.x0 - gap - start.width());
        }
        if is_adjacent(start, of, Direction::Top) {
            b.min_y0 = b.min_y0.max(of.y1 + gap);
        }
        if is_adjacent(start, of, Direction::Bottom) {
            b.max_y0 = b.max_y0.min(of.y0 - gap - start.height());
        }
    }
    b
}

fn min_along(size: Size, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => size.width,
        Axis::Vertical => size.height,
    }
}

/// Signed far-edge bound the container imposes along `direction`.
fn container_bound(direction: Direction, container: Size) -> f64 {
    match direction {
        Direction::Trailing => container.width,
        Direction::Bottom => f64::INFINITY,
        // Leading and top edges pin at zero; in signed coordinates the far
        // edge is the negated origin coordinate.
        Direction::Leading | Direction::Top => 0.0,
    }
}

/// One resize probe over the pinned gesture snapshot.
///
/// Computes the furthest signed far edge an item can reach along
/// `direction`, assuming every hinder ahead of it compresses to its minimum
/// size and cascades in turn. The snapshot does not change while the probe
/// runs, so each item's limit is computed once and cached; hinder graphs
/// that fan out and reconverge are walked once per member, not once per
/// path.
struct CascadeProbe<'a> {
    frames: &'a BTreeMap<ItemId, Rect>,
    mins: &'a BTreeMap<ItemId, Size>,
    gap: f64,
    bound: f64,
    direction: Direction,
    limits: BTreeMap<ItemId, f64>,
}

impl CascadeProbe<'_> {
    /// Never below the current far edge: an item that already sits at a
    /// limit stays put.
    fn far_limit(&mut self, id: ItemId, depth: usize) -> f64 {
        if let Some(&known) = self.limits.get(&id) {
            return known;
        }
        let frames = self.frames;
        let frame = frames[&id];
        let (_, hi) = signed_span(frame, self.direction);
        if depth >= MAX_CASCADE_DEPTH {
            return hi;
        }
        let mut limit = self.bound;
        for (&other, &of) in frames {
            if other == id || !is_adjacent(frame, of, self.direction) {
                continue;
            }
            let m = min_along(self.mins[&other], self.direction.axis());
            let ahead = self.far_limit(other, depth + 1);
            limit = limit.min(ahead - m - self.gap);
        }
        let limit = limit.max(hi);
        self.limits.insert(id, limit);
        limit
    }
}

/// Push `id`'s near edge to `new_lo`, shrinking it in place and moving its
/// far edge (cascading into its own hinders) only when the minimum size
/// forces it. Callers bound `new_lo` through [`CascadeProbe::far_limit`]
/// first.
fn compress(
    frames: &mut BTreeMap<ItemId, Rect>,
    mins: &BTreeMap<ItemId, Size>,
    gap: f64,
    id: ItemId,
    new_lo: f64,
    direction: Direction,
    depth: usize,
) {
    let frame = frames[&id];
    let (lo, hi) = signed_span(frame, direction);
    if depth >= MAX_CASCADE_DEPTH || new_lo <= lo + EPS {
        return;
    }
    let new_hi = hi.max(new_lo + min_along(mins[&id], direction.axis()));
    if new_hi > hi + EPS {
        let blocked: Vec<ItemId> = frames
            .iter()
            .filter(|&(&other, &of)| {
                other != id
                    && is_adjacent(frame, of, direction)
                    && signed_span(of, direction).0 < new_hi + gap - EPS
            })
            .map(|(&other, _)| other)
            .collect();
        for other in blocked {
            compress(frames, mins, gap, other, new_hi + gap, direction, depth + 1);
        }
    }
    frames.insert(id, with_signed_span(frame, direction, new_lo, new_hi));
}

/// Clamp `frame`'s size between `min` and `max`, moving only the anchor's
/// edges.
fn clamp_size(frame: Rect, anchor: ResizeAnchor, min: Size, max: Option<Size>) -> Rect {
    let max = max.unwrap_or(Size::new(f64::INFINITY, f64::INFINITY));
    let w = frame.width().clamp(min.width, max.width.max(min.width));
    let h = frame.height().clamp(min.height, max.height.max(min.height));
    match anchor {
        ResizeAnchor::TopLeading => Rect::new(frame.x1 - w, frame.y1 - h, frame.x1, frame.y1),
        ResizeAnchor::BottomTrailing => Rect::new(frame.x0, frame.y0, frame.x0 + w, frame.y0 + h),
    }
}

impl<I: BentoItem> BentoModel<I> {
    /// Pin (or keep) the gesture snapshot for `id`. Returns `false` for an
    /// unknown id.
    fn begin_interaction(&mut self, id: ItemId, kind: InteractionKind) -> bool {
        if self
            .interaction
            .as_ref()
            .is_some_and(|i| i.id == id && i.kind == kind)
        {
            return true;
        }
        if self.index_of(id).is_none() {
            return false;
        }
        self.interaction = Some(crate::model::Interaction {
            id,
            kind,
            origin: self.items.iter().map(|i| i.duplicate(true)).collect(),
        });
        // The moving item must not snap against its own old frame.
        self.rebuild_alignments(Some(id));
        true
    }

    /// Move `id` by `translation` from its gesture-start position.
    ///
    /// The first call on an idle model starts the gesture. Preference order
    /// for the new frame: alignment-snapped, raw, then clamped into the
    /// window the item's hinders leave open (with a re-snap of any axis the
    /// clamp freed). A frame that still cannot be placed leaves the item
    /// where the previous call put it. Returns `None` for an unknown id.
    pub fn drag_item(&mut self, id: ItemId, translation: Vec2) -> Option<ChangeSet> {
        if !self.begin_interaction(id, InteractionKind::Drag) {
            return None;
        }
        let (start, bounds) = {
            let interaction = self.interaction.as_ref()?;
            let start = interaction
                .origin
                .iter()
                .find(|i| i.id() == id)
                .map(BentoItem::frame)?;
            let bounds = drag_bounds(
                &interaction.origin,
                id,
                start,
                self.gap,
                self.container_size.width,
            );
            (start, bounds)
        };
        let moved = start + translation;
        // The container origin clips before anything else gets a say.
        let raw = Rect::from_origin_size(
            (moved.x0.max(0.0), moved.y0.max(0.0)),
            start.size(),
        );

        let mut chosen = self
            .alignments
            .snap_translated(raw, self.snap_threshold)
            .filter(|f| self.can_place(*f, Some(id)));
        if chosen.is_none() && self.can_place(raw, Some(id)) {
            chosen = Some(raw);
        }
        let new_frame = match chosen {
            Some(f) => f,
            None => {
                let x0 = if bounds.max_x0 >= bounds.min_x0 {
                    raw.x0.min(bounds.max_x0).max(bounds.min_x0)
                } else {
                    start.x0
                };
                let y0 = if bounds.max_y0 >= bounds.min_y0 {
                    raw.y0.min(bounds.max_y0).max(bounds.min_y0)
                } else {
                    start.y0
                };
                let clamped = Rect::from_origin_size((x0, y0), start.size());
                let resnapped = self
                    .alignments
                    .snap_translated(clamped, self.snap_threshold)
                    .filter(|f| self.can_place(*f, Some(id)));
                match resnapped {
                    Some(f) => f,
                    None if self.can_place(clamped, Some(id)) => clamped,
                    // Hemmed in on all sides: hold the last committed frame.
                    None => self.item(id)?.frame(),
                }
            }
        };

        self.active_guides = self.alignments.guides_for(new_frame, EPS);
        let pos = self.index_of(id)?;
        let old = self.items[pos].frame();
        let mut change = ChangeSet::default();
        if old != new_frame {
            self.items[pos].set_frame(new_frame);
            change.updated.push(id);
            self.commit_interactive(old.union(new_frame));
        }
        Some(change)
    }

    /// Finish a drag gesture: drop the snapshot, clear guides, re-index.
    pub fn end_drag(&mut self, id: ItemId) {
        if self
            .interaction
            .as_ref()
            .is_some_and(|i| i.id == id && i.kind == InteractionKind::Drag)
        {
            self.settle(id);
        }
    }

    /// Resize `id` by moving the `anchor` corner by `translation` from its
    /// gesture-start frame.
    ///
    /// The whole layout is re-solved from the gesture snapshot each call:
    /// neighbors in the path of growth compress toward their minimum sizes,
    /// cascading through chains of hinders, and growth clamps where a chain
    /// runs out of slack (or gets deeper than the propagation limit).
    /// Shrinking back releases every displaced neighbor. The change set
    /// lists every item whose frame moved; `None` means an unknown id.
    pub fn resize_item(
        &mut self,
        id: ItemId,
        translation: Vec2,
        anchor: ResizeAnchor,
    ) -> Option<ChangeSet> {
        if !self.begin_interaction(id, InteractionKind::Resize(anchor)) {
            return None;
        }
        let mut frames: BTreeMap<ItemId, Rect> = self
            .interaction
            .as_ref()?
            .origin
            .iter()
            .map(|i| (i.id(), i.frame()))
            .collect();
        let &start = frames.get(&id)?;
        let (min, max) = {
            let item = self.item(id)?;
            (item.minimum_size(), item.maximum_size())
        };
        let mins: BTreeMap<ItemId, Size> = self
            .items
            .iter()
            .map(|i| (i.id(), i.minimum_size()))
            .collect();

        let moved = match anchor {
            ResizeAnchor::TopLeading => Rect::new(
                start.x0 + translation.x,
                start.y0 + translation.y,
                start.x1,
                start.y1,
            ),
            ResizeAnchor::BottomTrailing => Rect::new(
                start.x0,
                start.y0,
                start.x1 + translation.x,
                start.y1 + translation.y,
            ),
        };
        let mut candidate = clamp_size(moved, anchor, min, max);
        if let Some(snapped) = self
            .alignments
            .snap_resized(candidate, anchor, self.snap_threshold)
        {
            candidate = clamp_size(snapped, anchor, min, max);
        }

        for direction in anchor.directions() {
            let frame = frames[&id];
            let (lo, hi) = signed_span(frame, direction);
            let (_, desired) = signed_span(candidate, direction);
            let final_hi = if desired <= hi + EPS {
                desired
            } else {
                let mut probe = CascadeProbe {
                    frames: &frames,
                    mins: &mins,
                    gap: self.gap,
                    bound: container_bound(direction, self.container_size),
                    direction,
                    limits: BTreeMap::new(),
                };
                let final_hi = desired.min(probe.far_limit(id, 0));
                let blocked: Vec<ItemId> = frames
                    .iter()
                    .filter(|&(&other, &of)| {
                        other != id
                            && is_adjacent(frame, of, direction)
                            && signed_span(of, direction).0 < final_hi + self.gap - EPS
                    })
                    .map(|(&other, _)| other)
                    .collect();
                for other in blocked {
                    compress(
                        &mut frames,
                        &mins,
                        self.gap,
                        other,
                        final_hi + self.gap,
                        direction,
                        1,
                    );
                }
                final_hi
            };
            frames.insert(id, with_signed_span(frame, direction, lo, final_hi));
        }

        let target = frames[&id];
        self.active_guides = self.alignments.guides_for(target, EPS);
        let mut change = ChangeSet::default();
        let mut dirty: Option<Rect> = None;
        for item in &mut self.items {
            let Some(&new) = frames.get(&item.id()) else {
                continue;
            };
            let old = item.frame();
            if old != new {
                item.set_frame(new);
                change.updated.push(item.id());
                let span = old.union(new);
                dirty = Some(dirty.map_or(span, |d| d.union(span)));
            }
        }
        if let Some(dirty) = dirty {
            self.commit_interactive(dirty);
        }
        Some(change)
    }

    /// Finish a resize gesture: drop the snapshot, clear guides, re-index.
    pub fn end_resize(&mut self, id: ItemId) {
        if self
            .interaction
            .as_ref()
            .is_some_and(|i| i.id == id && matches!(i.kind, InteractionKind::Resize(_)))
        {
            self.settle(id);
        }
    }

    fn settle(&mut self, id: ItemId) {
        // Drops the gesture snapshot, clears guides, re-indexes in full,
        // and folds the final frame into the gesture's checkpoint.
        let change = ChangeSet {
            updated: vec![id],
            ..ChangeSet::default()
        };
        self.commit_structural(&change);
    }
}
