// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bento Index: a bounded 2D occupancy grid for interactive layouts.
//!
//! The grid partitions a container into uniform cells and records, per cell,
//! the set of payload ids whose rectangle intersects it. It is the spatial
//! acceleration structure behind neighbor queries in a bento layout: instead
//! of scanning every item, callers fetch the ids covering a region and test
//! only those.
//!
//! - [`OccupancyGrid::rebuild_full`] re-derives every cell from an entry
//!   list. Use it after bulk changes or whenever the cell size changes.
//! - [`OccupancyGrid::refresh_region`] recomputes only the cells overlapping
//!   a dirty rectangle, for incremental updates during a drag or resize.
//! - [`OccupancyGrid::ids_in`] unions the id sets of all covered cells.
//!
//! The grid is a pure derived cache: it holds no source of truth and can be
//! rebuilt from the entry list at any time. Cell lookups are clamped to the
//! grid bounds and never panic; a refresh that reaches uncovered cells
//! reports a desynchronization so the caller can force a full rebuild.
//!
//! It is `no_std` (with `alloc`) and does not depend on any geometry crate;
//! higher layers convert their rectangle types into [`Region`].
//!
//! # Example
//!
//! ```rust
//! use bento_index::{OccupancyGrid, Region};
//!
//! let mut grid: OccupancyGrid<u64> = OccupancyGrid::new();
//! let items = [
//!     (1_u64, Region::from_xywh(0.0, 0.0, 100.0, 100.0)),
//!     (2_u64, Region::from_xywh(200.0, 0.0, 100.0, 100.0)),
//! ];
//! grid.rebuild_full(1000.0, 1000.0, 30.0, 30.0, items.iter().copied());
//!
//! let hits = grid.ids_in(Region::from_xywh(50.0, 50.0, 20.0, 20.0));
//! assert!(hits.contains(&1));
//! assert!(!hits.contains(&2));
//! ```

#![no_std]

extern crate alloc;

pub mod grid;
pub mod region;

pub use grid::OccupancyGrid;
pub use region::Region;
