//! Snapshot history with bounded linear undo/redo.
//!
//! DESIGN
//! ======
//! Every tracked mutation first records a full copy of the current value on
//! the `past` stack and clears `future`; undo and redo swap the live value
//! with the top of the opposite stack. Snapshots are owned clones, so later
//! edits to the live value can never reach back into history.
//!
//! `past` is bounded by `limit`. When a checkpoint pushes it over the limit
//! the oldest entry is dropped, so past a certain depth undo silently stops
//! reaching the oldest actions.
//!
//! A batch groups several tracked mutations into one undo step: while a batch
//! is open only the first mutation records a checkpoint. Batches are opt-in;
//! without one every mutation is its own step.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;
use std::mem;

use tracing::trace;

use crate::consts::MAX_HISTORY_LENGTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Batch {
    Closed,
    Open { checkpointed: bool },
}

/// Linear undo/redo over full snapshots of `T`.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<T>,
    future: Vec<T>,
    limit: usize,
    batch: Batch,
}

impl<T: Clone> History<T> {
    /// Create an empty history keeping at most `limit` undo steps.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { past: VecDeque::new(), future: Vec::new(), limit, batch: Batch::Closed }
    }

    /// Record `current` as the state to return to on the next undo.
    ///
    /// Call this before applying a tracked mutation. Always clears the redo
    /// chain. Returns `false` when the snapshot was folded into an open batch.
    pub fn checkpoint(&mut self, current: &T) -> bool {
        self.future.clear();

        match self.batch {
            Batch::Open { checkpointed: true } => return false,
            Batch::Open { checkpointed: false } => self.batch = Batch::Open { checkpointed: true },
            Batch::Closed => {}
        }

        self.past.push_back(current.clone());
        self.enforce_limit();
        true
    }

    /// Step back: `current` becomes the most recent snapshot and the value it
    /// held is kept for redo. Returns `false` (leaving `current` untouched)
    /// when there is nothing to undo.
    pub fn undo(&mut self, current: &mut T) -> bool {
        self.batch = Batch::Closed;
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        self.future.push(mem::replace(current, previous));
        true
    }

    /// Step forward again after an undo. Returns `false` when the redo chain
    /// is empty.
    pub fn redo(&mut self, current: &mut T) -> bool {
        self.batch = Batch::Closed;
        let Some(next) = self.future.pop() else {
            return false;
        };
        self.past.push_back(mem::replace(current, next));
        self.enforce_limit();
        true
    }

    /// Open a batch. Tracked mutations until [`end_batch`](Self::end_batch)
    /// undo as a single step. Opening an already open batch has no effect.
    pub fn begin_batch(&mut self) {
        if self.batch == Batch::Closed {
            self.batch = Batch::Open { checkpointed: false };
        }
    }

    /// Close the current batch, if any.
    pub fn end_batch(&mut self) {
        self.batch = Batch::Closed;
    }

    #[must_use]
    pub fn in_batch(&self) -> bool {
        self.batch != Batch::Closed
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    #[must_use]
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    #[must_use]
    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Undo snapshots, oldest first.
    pub fn past(&self) -> impl Iterator<Item = &T> {
        self.past.iter()
    }

    /// Redo snapshots, most recently undone last.
    pub fn future(&self) -> impl Iterator<Item = &T> {
        self.future.iter()
    }

    /// Maximum number of undo steps kept.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    fn enforce_limit(&mut self) {
        while self.past.len() > self.limit {
            self.past.pop_front();
            trace!(limit = self.limit, "oldest history entry evicted");
        }
    }
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new(MAX_HISTORY_LENGTH)
    }
}
