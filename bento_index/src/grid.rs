// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bounded occupancy grid.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::region::Region;

/// Uniform occupancy grid over a bounded container.
///
/// Cells are sized by the caller (typically the component-wise minimum of
/// every item's minimum size) and each holds the set of payload ids whose
/// region intersects the cell rectangle. Coordinates are expected to be
/// non-negative; the container's bottom edge is open, so the row count is
/// derived from whichever is larger, the container height or the content
/// extent supplied at rebuild time.
pub struct OccupancyGrid<P: Copy + Ord + Debug> {
    cell_w: f64,
    cell_h: f64,
    cols: usize,
    rows: usize,
    cells: Vec<BTreeSet<P>>, // row-major, rows * cols
}

impl<P: Copy + Ord + Debug> Default for OccupancyGrid<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Copy + Ord + Debug> OccupancyGrid<P> {
    /// Create an empty, zero-sized grid. Call
    /// [`rebuild_full`](Self::rebuild_full) before querying.
    pub const fn new() -> Self {
        Self {
            cell_w: 0.0,
            cell_h: 0.0,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        }
    }

    /// Number of columns currently indexed.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows currently indexed.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// The region covered by the cell array.
    pub fn coverage(&self) -> Region {
        Region::new(
            0.0,
            0.0,
            self.cell_w * self.cols as f64,
            self.cell_h * self.rows as f64,
        )
    }

    // `f64::floor`/`f64::ceil` live in std, not core, so the cell mapping
    // rounds through integer casts (which truncate toward zero).

    #[inline]
    fn floor_to_isize(v: f64) -> isize {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "cell indices are small; the cast truncates toward zero."
        )]
        let i = v as isize;
        if (i as f64) > v { i - 1 } else { i }
    }

    #[inline]
    fn ceil_to_usize(v: f64) -> usize {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "ceil of a positive extent over a positive cell size."
        )]
        let i = v as usize;
        if (i as f64) < v { i + 1 } else { i }
    }

    #[inline]
    fn col_of(&self, x: f64) -> isize {
        debug_assert!(self.cell_w > 0.0, "cell width must be positive");
        Self::floor_to_isize(x / self.cell_w)
    }

    #[inline]
    fn row_of(&self, y: f64) -> isize {
        debug_assert!(self.cell_h > 0.0, "cell height must be positive");
        Self::floor_to_isize(y / self.cell_h)
    }

    /// Inclusive cell range covered by `region`, clamped to the grid bounds.
    /// Returns `None` when the grid is empty or the region lies entirely
    /// outside it.
    fn cell_range(&self, region: &Region) -> Option<(usize, usize, usize, usize)> {
        if self.cols == 0 || self.rows == 0 || region.is_empty() {
            return None;
        }
        let c0 = self.col_of(region.min_x).max(0);
        let r0 = self.row_of(region.min_y).max(0);
        let c1 = self.col_of(region.max_x).min(self.cols as isize - 1);
        let r1 = self.row_of(region.max_y).min(self.rows as isize - 1);
        if c1 < c0 || r1 < r0 {
            return None;
        }
        #[allow(
            clippy::cast_sign_loss,
            reason = "range endpoints are clamped non-negative above."
        )]
        Some((c0 as usize, r0 as usize, c1 as usize, r1 as usize))
    }

    fn cell_region(&self, col: usize, row: usize) -> Region {
        Region::from_xywh(
            col as f64 * self.cell_w,
            row as f64 * self.cell_h,
            self.cell_w,
            self.cell_h,
        )
    }

    /// Rebuild every cell from scratch.
    ///
    /// The grid is sized to `ceil(extent / cell)` where the extent is the
    /// container width and the larger of the container height and the
    /// entries' bottommost edge (the container grows vertically).
    pub fn rebuild_full(
        &mut self,
        container_w: f64,
        container_h: f64,
        cell_w: f64,
        cell_h: f64,
        entries: impl IntoIterator<Item = (P, Region)>,
    ) {
        let entries: Vec<(P, Region)> = entries.into_iter().collect();
        if cell_w <= 0.0 || cell_h <= 0.0 || container_w <= 0.0 {
            self.cols = 0;
            self.rows = 0;
            self.cells.clear();
            return;
        }
        let extent_y = entries
            .iter()
            .fold(container_h, |acc, (_, r)| acc.max(r.max_y));
        self.cols = Self::ceil_to_usize(container_w / cell_w);
        self.rows = Self::ceil_to_usize(extent_y / cell_h);
        self.cell_w = cell_w;
        self.cell_h = cell_h;
        self.cells.clear();
        self.cells.resize(self.cols * self.rows, BTreeSet::new());
        for (id, r) in &entries {
            if let Some((c0, r0, c1, r1)) = self.cell_range(r) {
                for row in r0..=r1 {
                    for col in c0..=c1 {
                        if self.cell_region(col, row).intersects(r) {
                            self.cells[row * self.cols + col].insert(*id);
                        }
                    }
                }
            }
        }
    }

    /// Recompute only the cells overlapping `region` from the entry list.
    ///
    /// Callers must pass a region that is a safe superset of everything that
    /// changed (old frame ∪ new frame, inflated by the gap). Returns `false`
    /// when some entry intersecting the region extends past the indexed
    /// area — the grid is then stale and must be rebuilt in full.
    pub fn refresh_region(
        &mut self,
        region: Region,
        entries: impl IntoIterator<Item = (P, Region)>,
    ) -> bool {
        let entries: Vec<(P, Region)> = entries.into_iter().collect();
        let coverage = self.coverage();
        let mut in_sync = true;
        for (_, r) in &entries {
            if r.intersects(&region)
                && (r.min_x < 0.0 || r.min_y < 0.0 || r.max_x > coverage.max_x || r.max_y > coverage.max_y)
            {
                in_sync = false;
            }
        }
        let Some((c0, r0, c1, r1)) = self.cell_range(&region) else {
            // Nothing indexed under the region; stale only if geometry lives there.
            return in_sync;
        };
        for row in r0..=r1 {
            for col in c0..=c1 {
                let cell = self.cell_region(col, row);
                let slot = &mut self.cells[row * self.cols + col];
                slot.clear();
                for (id, r) in &entries {
                    if cell.intersects(r) {
                        slot.insert(*id);
                    }
                }
            }
        }
        in_sync
    }

    /// Ids of all entries recorded in cells overlapping `region`.
    ///
    /// The result is a superset test input: covered cells may contain ids
    /// whose exact geometry does not intersect `region`; callers re-test
    /// precise frames. Cell indices are clamped to the grid bounds.
    pub fn ids_in(&self, region: Region) -> BTreeSet<P> {
        let mut out = BTreeSet::new();
        if let Some((c0, r0, c1, r1)) = self.cell_range(&region) {
            for row in r0..=r1 {
                for col in c0..=c1 {
                    out.extend(self.cells[row * self.cols + col].iter().copied());
                }
            }
        }
        out
    }
}

impl<P: Copy + Ord + Debug> Debug for OccupancyGrid<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let occupied = self.cells.iter().filter(|c| !c.is_empty()).count();
        f.debug_struct("OccupancyGrid")
            .field("cell_w", &self.cell_w)
            .field("cell_h", &self.cell_h)
            .field("cols", &self.cols)
            .field("rows", &self.rows)
            .field("occupied_cells", &occupied)
            .finish_non_exhaustive()
    }
}
