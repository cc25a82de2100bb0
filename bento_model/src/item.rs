// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item identity, capability flags, and the item trait.

use core::sync::atomic::{AtomicU64, Ordering};
use kurbo::{Rect, Size};

/// Fallback minimum size applied when an item does not declare one.
pub const MIN_ITEM_SIZE_FALLBACK: Size = Size::new(30.0, 30.0);

/// Identifier for an item in the model.
///
/// Small, copyable, and stable for the lifetime of the logical item: it
/// survives [`BentoItem::duplicate`] with `keep_id = true` and undo/redo
/// restoration, so bindings held outside the engine stay valid. Allocation
/// is a process-wide monotonic counter; ids are never reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ItemId(u64);

impl ItemId {
    /// Allocate a fresh identifier.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

bitflags::bitflags! {
    /// Item capability flags consumed by the presentation layer.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        /// Item shows a resize handle (participates in resize gestures).
        const RESIZE_HANDLE = 0b0000_0001;
    }
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self::RESIZE_HANDLE
    }
}

/// An item hosted by the bento grid.
///
/// Implementations carry whatever content they like; the engine only reads
/// identity, geometry, and size constraints, and writes geometry back
/// through [`set_frame`](Self::set_frame). Undo/redo restores items through
/// [`duplicate`](Self::duplicate) and [`apply_change`](Self::apply_change)
/// so concrete types round-trip their own attributes.
pub trait BentoItem: Clone + core::fmt::Debug {
    /// Stable identity.
    fn id(&self) -> ItemId;

    /// Current frame in container pixels, origin top-left.
    fn frame(&self) -> Rect;

    /// Replace the frame. The engine only writes frames it has validated.
    fn set_frame(&mut self, frame: Rect);

    /// Size floor. Defaults to [`MIN_ITEM_SIZE_FALLBACK`].
    fn minimum_size(&self) -> Size {
        MIN_ITEM_SIZE_FALLBACK
    }

    /// Optional size ceiling.
    fn maximum_size(&self) -> Option<Size> {
        None
    }

    /// Corner radius, for the presentation layer only.
    fn border_radius(&self) -> f64 {
        0.0
    }

    /// Capability flags, for the presentation layer only.
    fn flags(&self) -> ItemFlags {
        ItemFlags::default()
    }

    /// Deep copy. With `keep_id` the copy shares this item's identity
    /// (checkpoint snapshots); without it the copy is a new logical item.
    fn duplicate(&self, keep_id: bool) -> Self;

    /// Copy `other`'s attributes onto `self` in place, preserving `self`'s
    /// storage so external bindings to this identity stay intact.
    fn apply_change(&mut self, other: &Self);
}

/// Plain rectangular item with optional size constraints.
#[derive(Clone, Debug, PartialEq)]
pub struct DefaultItem {
    id: ItemId,
    frame: Rect,
    min_size: Option<Size>,
    max_size: Option<Size>,
    border_radius: f64,
    flags: ItemFlags,
}

impl DefaultItem {
    /// Create an item of the given size at the container origin.
    pub fn new(size: Size) -> Self {
        Self::with_frame(Rect::from_origin_size(kurbo::Point::ZERO, size))
    }

    /// Create an item with an explicit frame.
    pub fn with_frame(frame: Rect) -> Self {
        Self {
            id: ItemId::next(),
            frame,
            min_size: None,
            max_size: None,
            border_radius: 20.0,
            flags: ItemFlags::default(),
        }
    }

    /// Set the minimum size. Builder-style.
    pub fn min_size(mut self, size: Size) -> Self {
        self.min_size = Some(size);
        self
    }

    /// Set the maximum size. Builder-style.
    pub fn max_size(mut self, size: Size) -> Self {
        self.max_size = Some(size);
        self
    }

    /// Set the corner radius. Builder-style.
    pub fn border_radius(mut self, radius: f64) -> Self {
        self.border_radius = radius;
        self
    }

    /// Replace the capability flags. Builder-style.
    pub fn flags(mut self, flags: ItemFlags) -> Self {
        self.flags = flags;
        self
    }
}

impl BentoItem for DefaultItem {
    fn id(&self) -> ItemId {
        self.id
    }

    fn frame(&self) -> Rect {
        self.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn minimum_size(&self) -> Size {
        self.min_size.unwrap_or(MIN_ITEM_SIZE_FALLBACK)
    }

    fn maximum_size(&self) -> Option<Size> {
        self.max_size
    }

    fn border_radius(&self) -> f64 {
        self.border_radius
    }

    fn flags(&self) -> ItemFlags {
        self.flags
    }

    fn duplicate(&self, keep_id: bool) -> Self {
        Self {
            id: if keep_id { self.id } else { ItemId::next() },
            ..self.clone()
        }
    }

    fn apply_change(&mut self, other: &Self) {
        self.frame = other.frame;
        self.min_size = other.min_size;
        self.max_size = other.max_size;
        self.border_radius = other.border_radius;
        self.flags = other.flags;
    }
}
