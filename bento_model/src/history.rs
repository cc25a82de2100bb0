// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Undo/redo checkpoints with debounced coalescing.
//!
//! Every committed mutation records the full item list. Mutations arriving
//! in a burst (within [`Checkpoints::DEBOUNCE`] of the previous one)
//! overwrite the latest checkpoint instead of growing the stack, so a
//! continuous interaction undoes as one step. There is no timer: the
//! debounce re-arms lazily from the timestamp of the next mutation.

use std::time::{Duration, Instant};

use crate::item::BentoItem;

/// Checkpoint stack over full item-list snapshots.
#[derive(Clone, Debug)]
pub struct Checkpoints<I> {
    snapshots: Vec<Vec<I>>,
    cursor: usize,
    armed: bool,
    last_record: Option<Instant>,
}

impl<I: BentoItem> Checkpoints<I> {
    /// Idle time after which the next mutation opens a fresh checkpoint.
    pub const DEBOUNCE: Duration = Duration::from_millis(500);

    /// Seed the stack with the initial state as the undo floor.
    pub fn new(initial: &[I]) -> Self {
        Self {
            snapshots: vec![snapshot(initial)],
            cursor: 0,
            armed: true,
            last_record: None,
        }
    }

    /// Record the state after a mutation at time `now`.
    ///
    /// Opens a new checkpoint when armed (first mutation, after idle, or
    /// after an undo/redo); otherwise coalesces into the current one. Any
    /// redo tail beyond the cursor is discarded.
    pub fn record(&mut self, items: &[I], now: Instant) {
        if !self.armed
            && self
                .last_record
                .is_none_or(|last| now.duration_since(last) >= Self::DEBOUNCE)
        {
            self.armed = true;
        }
        self.snapshots.truncate(self.cursor + 1);
        if self.armed {
            self.snapshots.push(snapshot(items));
            self.cursor = self.snapshots.len() - 1;
            self.armed = false;
        } else {
            self.snapshots[self.cursor] = snapshot(items);
        }
        self.last_record = Some(now);
    }

    /// Step back one checkpoint. `None` at the undo floor.
    pub fn undo(&mut self) -> Option<&[I]> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.armed = true;
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward one checkpoint. `None` at the top of the stack.
    pub fn redo(&mut self) -> Option<&[I]> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        self.armed = true;
        Some(&self.snapshots[self.cursor])
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }
}

fn snapshot<I: BentoItem>(items: &[I]) -> Vec<I> {
    items.iter().map(|i| i.duplicate(true)).collect()
}
