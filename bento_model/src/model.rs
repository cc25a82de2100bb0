// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The model: item storage, the occupancy grid, hinder queries, commit
//! paths, and undo/redo reconciliation.

use std::collections::VecDeque;
use std::time::Instant;

use bento_index::{OccupancyGrid, Region};
use kurbo::{Rect, Size};

use crate::alignment::{AlignmentCatalog, AlignmentGuide, AlignmentMatch};
use crate::history::Checkpoints;
use crate::hinder::{Direction, is_adjacent};
use crate::item::{BentoItem, ItemId, MIN_ITEM_SIZE_FALLBACK};
use crate::solver::ResizeAnchor;
use crate::util::{consistency_warn, frames_overlap, rect_to_region};

/// Default separation kept between any two items, in pixels.
pub(crate) const DEFAULT_GAP: f64 = 10.0;

/// Default reach of alignment snapping, in pixels.
pub(crate) const DEFAULT_SNAP_THRESHOLD: f64 = 6.0;

pub(crate) const EPS: f64 = 1e-6;

/// Structural notification for the presentation layer.
///
/// Emitted when the item set changes, including through undo/redo, so view
/// hierarchies can create and destroy bindings. Drain with
/// [`BentoModel::take_events`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BentoEvent {
    /// The item now exists in the model.
    Inserted(ItemId),
    /// The item no longer exists in the model.
    Removed(ItemId),
}

/// Normalized description of one committed mutation.
///
/// Every public mutation returns one. Grid refresh, alignment rebuild, the
/// event stream, and checkpoint recording are all driven from the change
/// set explicitly; nothing observes the item list behind the caller's back.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ChangeSet {
    /// Items the mutation added.
    pub inserted: Vec<ItemId>,
    /// Items the mutation removed.
    pub removed: Vec<ItemId>,
    /// Items whose frame or attributes changed.
    pub updated: Vec<ItemId>,
}

impl ChangeSet {
    /// True when the mutation changed nothing.
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum InteractionKind {
    Drag,
    Resize(ResizeAnchor),
}

/// Scratch state pinned for the duration of one drag or resize gesture.
#[derive(Clone, Debug)]
pub(crate) struct Interaction<I> {
    pub(crate) id: ItemId,
    pub(crate) kind: InteractionKind,
    /// Every item's state when the gesture began; each frame of the gesture
    /// re-solves from here so partial displacements reverse cleanly.
    pub(crate) origin: Vec<I>,
}

/// The bento grid engine.
///
/// Owns the items, the occupancy grid over them, the alignment catalog, the
/// checkpoint history, and the event queue. See the crate docs for an
/// overview; drag and resize entry points live in the solver impl.
#[derive(Debug)]
pub struct BentoModel<I: BentoItem> {
    pub(crate) items: Vec<I>,
    pub(crate) container_size: Size,
    pub(crate) gap: f64,
    pub(crate) snap_threshold: f64,
    pub(crate) grid: OccupancyGrid<ItemId>,
    pub(crate) alignments: AlignmentCatalog,
    pub(crate) active_guides: Vec<AlignmentGuide>,
    pub(crate) interaction: Option<Interaction<I>>,
    pub(crate) history: Checkpoints<I>,
    pub(crate) events: VecDeque<BentoEvent>,
}

impl<I: BentoItem> BentoModel<I> {
    /// Create an empty model over a container of the given size.
    pub fn new(container_size: Size) -> Self {
        Self {
            items: Vec::new(),
            container_size,
            gap: DEFAULT_GAP,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            grid: OccupancyGrid::new(),
            alignments: AlignmentCatalog::default(),
            active_guides: Vec::new(),
            interaction: None,
            history: Checkpoints::new(&[]),
            events: VecDeque::new(),
        }
    }

    /// The items, in insertion order.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Look up an item by id.
    pub fn item(&self, id: ItemId) -> Option<&I> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// The container size. Width and the top edge bound placement; the
    /// bottom edge is open (content may extend below it).
    pub fn container_size(&self) -> Size {
        self.container_size
    }

    /// The separation kept between items.
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Change the separation kept between items.
    ///
    /// Existing frames are not re-solved; the new gap applies from the next
    /// interaction on.
    pub fn set_gap(&mut self, gap: f64) {
        self.gap = gap.max(0.0);
        self.rebuild_grid_full();
    }

    /// The reach of alignment snapping.
    pub fn snap_threshold(&self) -> f64 {
        self.snap_threshold
    }

    /// Change the reach of alignment snapping.
    pub fn set_snap_threshold(&mut self, threshold: f64) {
        self.snap_threshold = threshold.max(0.0);
    }

    /// Every alignment candidate within the snap threshold of `frame`,
    /// harvested from the static set of the current gesture (all items when
    /// idle).
    pub fn available_alignments(&self, frame: Rect) -> Vec<AlignmentMatch> {
        self.alignments.available_alignments(frame, self.snap_threshold)
    }

    /// Alignment guides the current gesture is locked onto, for rendering.
    pub fn active_guides(&self) -> &[AlignmentGuide] {
        &self.active_guides
    }

    /// Whether a drag gesture is in flight.
    pub fn is_dragging(&self) -> bool {
        self.interaction
            .as_ref()
            .is_some_and(|i| i.kind == InteractionKind::Drag)
    }

    /// Whether a resize gesture is in flight.
    pub fn is_resizing(&self) -> bool {
        self.interaction
            .as_ref()
            .is_some_and(|i| matches!(i.kind, InteractionKind::Resize(_)))
    }

    /// The item owning the in-flight gesture, if any.
    pub fn active_item(&self) -> Option<ItemId> {
        self.interaction.as_ref().map(|i| i.id)
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Resize the container. Item frames stay put; the occupancy grid is
    /// re-indexed to the new bounds.
    pub fn set_container_size(&mut self, size: Size) {
        self.container_size = size;
        self.rebuild_grid_full();
    }

    /// Drain pending insert/remove notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<BentoEvent> {
        self.events.drain(..).collect()
    }

    /// Component-wise minimum of every item's minimum size: the occupancy
    /// cell size. No item can then span fewer than one cell per axis.
    pub fn min_item_size(&self) -> Size {
        let mut out: Option<Size> = None;
        for item in &self.items {
            let m = item.minimum_size();
            out = Some(out.map_or(m, |acc| {
                Size::new(acc.width.min(m.width), acc.height.min(m.height))
            }));
        }
        let out = out.unwrap_or(MIN_ITEM_SIZE_FALLBACK);
        Size::new(out.width.max(1.0), out.height.max(1.0))
    }

    /// Whether `frame` fits the container bounds and keeps at least the gap
    /// to every item other than `exclude`.
    ///
    /// Candidates come from the occupancy grid: every live frame is indexed,
    /// so only items recorded in cells under the gap-padded frame can
    /// violate the gap, and only those get the exact test.
    pub fn can_place(&self, frame: Rect, exclude: Option<ItemId>) -> bool {
        if frame.x0 < -EPS || frame.y0 < -EPS || frame.x1 > self.container_size.width + EPS {
            return false;
        }
        let region = rect_to_region(frame).inflate(self.gap, self.gap);
        self.grid
            .ids_in(region)
            .into_iter()
            .filter(|&other| Some(other) != exclude)
            .all(|other| {
                self.item(other)
                    .is_none_or(|i| !frames_overlap(frame, i.frame(), self.gap))
            })
    }

    /// Coarse, direction-agnostic candidate set: every item indexed in the
    /// one-cell neighborhood around `id`'s frame. A superset of anything
    /// that can block `id` over a short step; callers narrow it with
    /// [`adjacent_hinders`](Self::adjacent_hinders) or exact frame tests.
    /// No ordering guarantee beyond id order.
    pub fn potential_hinders(&self, id: ItemId) -> Vec<ItemId> {
        let Some(frame) = self.item(id).map(BentoItem::frame) else {
            return Vec::new();
        };
        let cell = self.min_item_size();
        self.grid
            .ids_in(rect_to_region(frame).inflate(cell.width, cell.height))
            .into_iter()
            .filter(|&other| other != id)
            .collect()
    }

    /// Candidates from [`potential_hinders`](Self::potential_hinders) lying
    /// on the `direction` side of `id` with strictly overlapping cross-axis
    /// projections: the neighbors that bound movement or absorb compression
    /// on that side.
    pub fn adjacent_hinders(&self, id: ItemId, direction: Direction) -> Vec<ItemId> {
        let Some(frame) = self.item(id).map(BentoItem::frame) else {
            return Vec::new();
        };
        self.potential_hinders(id)
            .into_iter()
            .filter(|&other| {
                self.item(other)
                    .is_some_and(|o| is_adjacent(frame, o.frame(), direction))
            })
            .collect()
    }

    /// Insert an item.
    ///
    /// The item's own frame is kept when it is already free; otherwise the
    /// item is auto-placed at the first free row-major slot. Returns `None`
    /// (inserting nothing) when no slot exists.
    pub fn insert_item(&mut self, item: I) -> Option<ChangeSet> {
        let frame = item.frame();
        let origin = if self.can_place(frame, None) {
            frame.origin()
        } else {
            self.auto_position(frame.size(), None)?
        };
        let mut item = item;
        item.set_frame(Rect::from_origin_size(origin, frame.size()));
        let id = item.id();
        self.items.push(item);
        let change = ChangeSet {
            inserted: vec![id],
            ..ChangeSet::default()
        };
        self.commit_structural(&change);
        Some(change)
    }

    /// Remove an item. Remaining items keep their frames. `None` for an
    /// unknown id.
    pub fn remove_item(&mut self, id: ItemId) -> Option<ChangeSet> {
        let pos = self.index_of(id)?;
        self.items.remove(pos);
        let change = ChangeSet {
            removed: vec![id],
            ..ChangeSet::default()
        };
        self.commit_structural(&change);
        Some(change)
    }

    /// Exchange the origins of two items, keeping both legal. `None`
    /// (leaving the model untouched) when either re-anchored frame would
    /// overlap a third item or leave the container.
    pub fn swap(&mut self, a: ItemId, b: ItemId) -> Option<ChangeSet> {
        let (ia, ib) = (self.index_of(a)?, self.index_of(b)?);
        if ia == ib {
            return None;
        }
        let fa = self.items[ia].frame();
        let fb = self.items[ib].frame();
        // Sizes travel with their items; only the origins trade places.
        let na = Rect::from_origin_size(fb.origin(), fa.size());
        let nb = Rect::from_origin_size(fa.origin(), fb.size());
        let fits = |frame: Rect, other_frame: Rect| {
            frame.x0 >= -EPS
                && frame.y0 >= -EPS
                && frame.x1 <= self.container_size.width + EPS
                && !frames_overlap(frame, other_frame, self.gap)
                && self
                    .items
                    .iter()
                    .filter(|i| i.id() != a && i.id() != b)
                    .all(|i| !frames_overlap(frame, i.frame(), self.gap))
        };
        if !fits(na, nb) || !fits(nb, na) {
            return None;
        }
        self.items[ia].set_frame(na);
        self.items[ib].set_frame(nb);
        let change = ChangeSet {
            updated: vec![a, b],
            ..ChangeSet::default()
        };
        self.commit_structural(&change);
        Some(change)
    }

    /// Step back one checkpoint. `None` at the undo floor.
    pub fn undo(&mut self) -> Option<ChangeSet> {
        let snapshot = self
            .history
            .undo()
            .map(|s| s.iter().map(|i| i.duplicate(true)).collect::<Vec<I>>())?;
        Some(self.restore(&snapshot))
    }

    /// Step forward one checkpoint. `None` at the top of history.
    pub fn redo(&mut self) -> Option<ChangeSet> {
        let snapshot = self
            .history
            .redo()
            .map(|s| s.iter().map(|i| i.duplicate(true)).collect::<Vec<I>>())?;
        Some(self.restore(&snapshot))
    }

    /// Reconcile the live item list against a checkpoint snapshot.
    ///
    /// Surviving items mutate in place through `apply_change` so outside
    /// bindings to their identity stay valid; items only in the snapshot are
    /// resurrected with their original ids; items absent from it are
    /// dropped. Order follows the snapshot. No checkpoint is recorded.
    fn restore(&mut self, snapshot: &[I]) -> ChangeSet {
        let mut change = ChangeSet::default();
        let mut old = core::mem::take(&mut self.items);
        let mut next = Vec::with_capacity(snapshot.len());
        for snap in snapshot {
            if let Some(pos) = old.iter().position(|i| i.id() == snap.id()) {
                let mut live = old.swap_remove(pos);
                live.apply_change(snap);
                change.updated.push(live.id());
                next.push(live);
            } else {
                change.inserted.push(snap.id());
                next.push(snap.duplicate(true));
            }
        }
        for gone in old {
            change.removed.push(gone.id());
        }
        self.items = next;
        self.publish(&change);
        self.interaction = None;
        self.active_guides.clear();
        self.rebuild_grid_full();
        self.rebuild_alignments(None);
        change
    }

    pub(crate) fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id() == id)
    }

    pub(crate) fn rebuild_grid_full(&mut self) {
        let cell = self.min_item_size();
        let entries: Vec<(ItemId, Region)> = self
            .items
            .iter()
            .map(|i| (i.id(), rect_to_region(i.frame())))
            .collect();
        self.grid.rebuild_full(
            self.container_size.width,
            self.container_size.height,
            cell.width,
            cell.height,
            entries,
        );
    }

    /// Re-harvest alignment candidates from every item except `exclude`
    /// (the item being dragged or resized must not snap to itself).
    pub(crate) fn rebuild_alignments(&mut self, exclude: Option<ItemId>) {
        self.alignments.rebuild(
            self.items
                .iter()
                .filter(|i| Some(i.id()) != exclude)
                .map(BentoItem::frame),
        );
    }

    fn publish(&mut self, change: &ChangeSet) {
        for &id in &change.inserted {
            self.events.push_back(BentoEvent::Inserted(id));
        }
        for &id in &change.removed {
            self.events.push_back(BentoEvent::Removed(id));
        }
    }

    /// Commit a structural mutation: publish its events, re-index in full,
    /// refresh the alignment catalog, checkpoint. Any in-flight gesture is
    /// working from a snapshot the mutation just invalidated, so it ends
    /// here.
    pub(crate) fn commit_structural(&mut self, change: &ChangeSet) {
        self.publish(change);
        self.interaction = None;
        self.active_guides.clear();
        self.rebuild_grid_full();
        self.rebuild_alignments(None);
        self.history.record(&self.items, Instant::now());
    }

    /// Commit an interactive frame: refresh only the cells under `dirty`
    /// (old ∪ new frames of everything the solver touched), falling back to
    /// a full rebuild when geometry escaped the indexed area.
    pub(crate) fn commit_interactive(&mut self, dirty: Rect) {
        let region = rect_to_region(dirty).inflate(self.gap, self.gap);
        let entries: Vec<(ItemId, Region)> = self
            .items
            .iter()
            .map(|i| (i.id(), rect_to_region(i.frame())))
            .collect();
        if !self.grid.refresh_region(region, entries) {
            consistency_warn!("occupancy grid lost coverage of moved geometry; rebuilding");
            self.rebuild_grid_full();
        }
        self.history.record(&self.items, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::DefaultItem;
    use kurbo::Vec2;
    use proptest::prelude::*;

    fn sized(w: f64, h: f64) -> DefaultItem {
        DefaultItem::new(Size::new(w, h))
    }

    fn model_1000() -> BentoModel<DefaultItem> {
        BentoModel::new(Size::new(1000.0, 1000.0))
    }

    fn seeded(frames: &[Rect]) -> (BentoModel<DefaultItem>, Vec<ItemId>) {
        let mut model = model_1000();
        let mut ids = Vec::new();
        for &f in frames {
            let item = DefaultItem::with_frame(f);
            ids.push(item.id());
            assert!(model.insert_item(item).is_some(), "seed frame must be free");
        }
        model.take_events();
        (model, ids)
    }

    #[test]
    fn insert_reports_change_and_indexes_item() {
        let mut model = model_1000();
        let item = sized(100.0, 100.0);
        let id = item.id();
        let change = model.insert_item(item).expect("empty container has room");
        assert_eq!(change.inserted, vec![id]);
        assert!(change.removed.is_empty() && change.updated.is_empty());
        assert_eq!(model.take_events(), vec![BentoEvent::Inserted(id)]);
        let hits = model.grid.ids_in(Region::from_xywh(10.0, 10.0, 10.0, 10.0));
        assert!(hits.contains(&id));
    }

    #[test]
    fn remove_reports_change_and_drops_from_index() {
        let mut model = model_1000();
        let item = sized(100.0, 100.0);
        let id = item.id();
        let _ = model.insert_item(item);
        model.take_events();
        let change = model.remove_item(id).expect("item exists");
        assert_eq!(change.removed, vec![id]);
        assert_eq!(model.take_events(), vec![BentoEvent::Removed(id)]);
        assert!(
            model
                .grid
                .ids_in(Region::from_xywh(10.0, 10.0, 10.0, 10.0))
                .is_empty()
        );
        assert!(model.remove_item(id).is_none());
    }

    #[test]
    fn can_place_respects_gap_and_bounds() {
        let (model, _) = seeded(&[Rect::new(0.0, 0.0, 100.0, 100.0)]);
        // Exactly one gap away is legal.
        assert!(model.can_place(Rect::new(110.0, 0.0, 210.0, 100.0), None));
        // One pixel closer is not.
        assert!(!model.can_place(Rect::new(109.0, 0.0, 209.0, 100.0), None));
        // Outside the right edge is not; below the bottom edge is.
        assert!(!model.can_place(Rect::new(950.0, 0.0, 1050.0, 100.0), None));
        assert!(model.can_place(Rect::new(0.0, 2000.0, 100.0, 2100.0), None));
    }

    #[test]
    fn can_place_sees_every_blocker_through_the_index() {
        // A 5x5 lattice of 100 px items at a 110 px stride.
        let frames: Vec<Rect> = (0..25)
            .map(|n| {
                let x = f64::from(n % 5) * 110.0;
                let y = f64::from(n / 5) * 110.0;
                Rect::new(x, y, x + 100.0, y + 100.0)
            })
            .collect();
        let (model, _) = seeded(&frames);
        // Dead center of an occupied slot.
        assert!(!model.can_place(Rect::new(230.0, 230.0, 320.0, 320.0), None));
        // Nestled against the lattice corner, exactly one gap clear.
        assert!(model.can_place(Rect::new(550.0, 550.0, 650.0, 650.0), None));
        // Closer than the gap to the lattice's last row.
        assert!(!model.can_place(Rect::new(0.0, 545.0, 100.0, 645.0), None));
        // Well below everything indexed.
        assert!(model.can_place(Rect::new(0.0, 2000.0, 100.0, 2100.0), None));
    }

    #[test]
    fn hinder_queries_filter_by_side_and_projection() {
        let (model, ids) = seeded(&[
            Rect::new(0.0, 0.0, 200.0, 200.0),
            Rect::new(220.0, 0.0, 420.0, 200.0),
            Rect::new(220.0, 210.0, 420.0, 410.0),
        ]);
        let (ia, ib, ic) = (ids[0], ids[1], ids[2]);

        let coarse = model.potential_hinders(ia);
        assert!(coarse.contains(&ib));
        assert!(!coarse.contains(&ia));

        assert_eq!(model.adjacent_hinders(ia, Direction::Trailing), vec![ib]);
        assert!(model.adjacent_hinders(ia, Direction::Leading).is_empty());
        assert_eq!(model.adjacent_hinders(ib, Direction::Leading), vec![ia]);
        // The lower-right item has no cross-axis overlap with the first.
        assert!(
            !model
                .adjacent_hinders(ia, Direction::Trailing)
                .contains(&ic)
        );
        assert_eq!(model.adjacent_hinders(ic, Direction::Top), vec![ib]);
    }

    #[test]
    fn far_items_are_not_potential_hinders() {
        let (model, ids) = seeded(&[
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(700.0, 700.0, 800.0, 800.0),
        ]);
        assert!(model.potential_hinders(ids[0]).is_empty());
        assert!(model.potential_hinders(ids[1]).is_empty());
    }

    #[test]
    fn swap_exchanges_origins() {
        let (mut model, ids) = seeded(&[
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(200.0, 0.0, 300.0, 100.0),
        ]);
        let change = model.swap(ids[0], ids[1]).expect("both slots stay legal");
        assert_eq!(change.updated, vec![ids[0], ids[1]]);
        assert_eq!(model.item(ids[0]).map(|i| i.frame().x0), Some(200.0));
        assert_eq!(model.item(ids[1]).map(|i| i.frame().x0), Some(0.0));
    }

    #[test]
    fn swap_refuses_to_create_overlap() {
        // Swapping a wide item into a slot hemmed in on the right must fail.
        let (mut model, ids) = seeded(&[
            Rect::new(0.0, 300.0, 400.0, 400.0),
            Rect::new(700.0, 0.0, 800.0, 100.0),
            Rect::new(850.0, 0.0, 950.0, 100.0),
        ]);
        assert!(model.swap(ids[0], ids[1]).is_none());
        assert_eq!(model.item(ids[0]).map(|i| i.frame().x0), Some(0.0));
    }

    #[test]
    fn undo_redo_preserve_identity() {
        let mut model = model_1000();
        let item = sized(100.0, 100.0);
        let id = item.id();
        let _ = model.insert_item(item);
        std::thread::sleep(std::time::Duration::from_millis(510));
        let second = sized(100.0, 100.0);
        let id2 = second.id();
        let _ = model.insert_item(second);
        model.take_events();

        let change = model.undo().expect("one step below");
        assert_eq!(change.removed, vec![id2]);
        assert_eq!(model.items().len(), 1);
        assert_eq!(model.items()[0].id(), id);
        assert_eq!(model.take_events(), vec![BentoEvent::Removed(id2)]);

        let change = model.redo().expect("redo available");
        assert_eq!(change.inserted, vec![id2]);
        assert_eq!(model.items().len(), 2);
        assert_eq!(model.items()[1].id(), id2, "redo resurrects the same id");
        assert_eq!(model.take_events(), vec![BentoEvent::Inserted(id2)]);
    }

    #[test]
    fn undo_at_floor_is_a_no_op() {
        let mut model = model_1000();
        assert!(model.undo().is_none());
        let _ = model.insert_item(sized(100.0, 100.0));
        assert!(model.undo().is_some());
        assert!(model.undo().is_none());
        assert!(model.items().is_empty());
    }

    #[test]
    fn min_item_size_is_componentwise() {
        let mut model = model_1000();
        let _ = model.insert_item(sized(100.0, 100.0).min_size(Size::new(80.0, 20.0)));
        let _ = model.insert_item(sized(100.0, 100.0).min_size(Size::new(25.0, 90.0)));
        assert_eq!(model.min_item_size(), Size::new(25.0, 20.0));
    }

    /// One user-level mutation, with item references by position so streams
    /// stay meaningful as the item set grows and shrinks.
    #[derive(Clone, Debug)]
    enum Command {
        Insert(f64, f64),
        Remove(usize),
        Drag(usize, f64, f64),
        Resize(usize, f64, f64),
        Undo,
        Redo,
    }

    fn command() -> impl Strategy<Value = Command> {
        prop_oneof![
            3 => (40.0f64..250.0, 40.0f64..250.0).prop_map(|(w, h)| Command::Insert(w, h)),
            1 => (0usize..12).prop_map(Command::Remove),
            3 => (0usize..12, -400.0f64..400.0, -400.0f64..400.0)
                .prop_map(|(n, x, y)| Command::Drag(n, x, y)),
            3 => (0usize..12, -200.0f64..300.0, -200.0f64..300.0)
                .prop_map(|(n, x, y)| Command::Resize(n, x, y)),
            1 => Just(Command::Undo),
            1 => Just(Command::Redo),
        ]
    }

    fn nth_id(model: &BentoModel<DefaultItem>, n: usize) -> Option<ItemId> {
        if model.items().is_empty() {
            return None;
        }
        model.items().get(n % model.items().len()).map(BentoItem::id)
    }

    fn run(model: &mut BentoModel<DefaultItem>, command: Command) {
        match command {
            Command::Insert(w, h) => {
                let _ = model.insert_item(sized(w, h));
            }
            Command::Remove(n) => {
                if let Some(id) = nth_id(model, n) {
                    let _ = model.remove_item(id);
                }
            }
            Command::Drag(n, x, y) => {
                if let Some(id) = nth_id(model, n) {
                    let _ = model.drag_item(id, Vec2::new(x, y));
                    model.end_drag(id);
                }
            }
            Command::Resize(n, x, y) => {
                if let Some(id) = nth_id(model, n) {
                    let _ = model.resize_item(id, Vec2::new(x, y), ResizeAnchor::BottomTrailing);
                    model.end_resize(id);
                }
            }
            Command::Undo => {
                let _ = model.undo();
            }
            Command::Redo => {
                let _ = model.redo();
            }
        }
    }

    proptest! {
        /// Whatever gets inserted, no pair of placed items ever violates the
        /// gap and every item stays inside the horizontal bounds.
        #[test]
        fn inserted_layouts_stay_legal(sizes in proptest::collection::vec((40.0f64..300.0, 40.0f64..300.0), 1..20)) {
            let mut model = model_1000();
            for (w, h) in sizes {
                let _ = model.insert_item(sized(w, h));
            }
            let items = model.items();
            for (n, a) in items.iter().enumerate() {
                prop_assert!(a.frame().x0 >= -EPS);
                prop_assert!(a.frame().y0 >= -EPS);
                prop_assert!(a.frame().x1 <= 1000.0 + EPS);
                for b in &items[n + 1..] {
                    prop_assert!(
                        !frames_overlap(a.frame(), b.frame(), model.gap()),
                        "{} and {} are closer than the gap", a.id(), b.id()
                    );
                }
            }
        }

        /// The non-overlap and bounds invariants survive arbitrary streams
        /// of inserts, removes, whole drag and resize gestures, and history
        /// steps, checked after every command.
        #[test]
        fn command_streams_keep_layouts_legal(commands in proptest::collection::vec(command(), 1..25)) {
            let mut model = model_1000();
            for c in commands {
                run(&mut model, c);
                let items = model.items();
                for (n, a) in items.iter().enumerate() {
                    prop_assert!(a.frame().x0 >= -EPS);
                    prop_assert!(a.frame().y0 >= -EPS);
                    prop_assert!(a.frame().x1 <= 1000.0 + EPS);
                    for b in &items[n + 1..] {
                        prop_assert!(
                            !frames_overlap(a.frame(), b.frame(), model.gap()),
                            "{} and {} are closer than the gap", a.id(), b.id()
                        );
                    }
                }
            }
        }

        /// Undoing to the floor and redoing the same number of steps lands
        /// on the same item set, identities and frames included, from any
        /// point a command stream leaves the model at.
        #[test]
        fn undo_all_then_redo_all_is_identity(commands in proptest::collection::vec(command(), 1..20)) {
            let mut model = model_1000();
            for c in commands {
                run(&mut model, c);
            }
            let before: Vec<(ItemId, Rect)> =
                model.items().iter().map(|i| (i.id(), i.frame())).collect();
            let mut steps = 0usize;
            while model.undo().is_some() {
                steps += 1;
                prop_assert!(steps <= 64, "history deeper than the command stream");
            }
            for _ in 0..steps {
                prop_assert!(model.redo().is_some());
            }
            let after: Vec<(ItemId, Rect)> =
                model.items().iter().map(|i| (i.id(), i.frame())).collect();
            prop_assert_eq!(before, after);
        }
    }
}
