// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bento Model: the layout and constraint-propagation engine behind an
//! interactive bento grid.
//!
//! A [`BentoModel`] owns an ordered list of rectangular items inside a
//! bounded container and keeps them mutually non-overlapping (separated by a
//! fixed gap) across every interaction:
//!
//! - **Drag**: [`BentoModel::drag_item`] moves an item by a pointer
//!   translation, snapping to alignment guides and clamping against blocking
//!   neighbors ("hinders") found through the occupancy grid.
//! - **Resize**: [`BentoModel::resize_item`] grows or shrinks an item from a
//!   corner anchor, cascading compression through chains of neighbors and
//!   self-limiting when they cannot vacate enough space.
//! - **Placement**: [`BentoModel::insert_item`] auto-places new items in the
//!   first free row-major slot; [`BentoModel::rearrange`] packs items toward
//!   an edge.
//! - **History**: every mutation is checkpointed with debounced coalescing,
//!   so [`BentoModel::undo`] / [`BentoModel::redo`] step whole user actions
//!   while preserving item identity.
//!
//! The engine is presentation-agnostic: it consumes pointer translations and
//! discrete commands, and hands back item frames, active alignment guides,
//! and an insert/remove event stream for the rendering layer. All entry
//! points run synchronously on the caller's thread; there is no internal
//! parallelism.
//!
//! Rendering, gesture recognition, and animation timing are out of scope.
//!
//! # Example
//!
//! ```rust
//! use bento_model::{BentoItem, BentoModel, DefaultItem};
//! use kurbo::{Size, Vec2};
//!
//! let mut model: BentoModel<DefaultItem> = BentoModel::new(Size::new(1000.0, 1000.0));
//! let a = DefaultItem::new(Size::new(100.0, 100.0));
//! let id = a.id();
//! assert!(model.insert_item(a).is_some());
//!
//! // Drag the item 50 px right, then settle.
//! model.drag_item(id, Vec2::new(50.0, 0.0));
//! model.end_drag(id);
//! assert_eq!(model.items()[0].frame().x0, 50.0);
//! ```

pub mod alignment;
pub mod hinder;
pub mod history;
pub mod item;
pub mod model;
mod placement;
mod solver;
mod util;

pub use alignment::{AlignmentGuide, AlignmentMatch, FrameEdge};
pub use hinder::{Axis, Direction};
pub use item::{BentoItem, DefaultItem, ItemFlags, ItemId, MIN_ITEM_SIZE_FALLBACK};
pub use model::{BentoEvent, BentoModel, ChangeSet};
pub use placement::PackDirection;
pub use solver::ResizeAnchor;
