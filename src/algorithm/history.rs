//! Collapse decision log and periodic grid snapshots
//!
//! The history records deliberate collapse decisions only; narrowings from
//! propagation are reconstructed by replay. Snapshots are full grid copies
//! taken every few decisions so a rollback rarely has to replay from the
//! start. Both are attempt-local and discarded on restart.

use crate::io::configuration::MAX_SNAPSHOTS;
use crate::spatial::grid::SuperpositionGrid;
use std::collections::VecDeque;

/// One deliberate collapse decision
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Cell x coordinate
    pub x: usize,
    /// Cell y coordinate
    pub y: usize,
    /// Tile the cell was committed to
    pub tile: usize,
}

/// Append-only log of collapse decisions
#[derive(Debug, Default, Clone)]
pub struct DecisionHistory {
    entries: Vec<HistoryEntry>,
}

impl DecisionHistory {
    /// Create an empty history
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a collapse decision
    pub fn push(&mut self, x: usize, y: usize, tile: usize) {
        self.entries.push(HistoryEntry { x, y, tile });
    }

    /// Number of recorded decisions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no decisions have been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop the newest entries down to `len` decisions
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// Entries from index `start` onwards, oldest first
    pub fn entries_from(&self, start: usize) -> &[HistoryEntry] {
        self.entries.get(start..).unwrap_or(&[])
    }

    /// Forget all decisions
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// A captured rewind point
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Deep copy of the grid at capture time
    pub grid: SuperpositionGrid,
    /// History length at capture time
    pub history_len: usize,
}

/// FIFO store of the most recent grid snapshots
#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: VecDeque<Snapshot>,
}

impl SnapshotStore {
    /// Create an empty store
    pub const fn new() -> Self {
        Self {
            snapshots: VecDeque::new(),
        }
    }

    /// Capture a snapshot, dropping the oldest when the store is full
    pub fn capture(&mut self, grid: &SuperpositionGrid, history_len: usize) {
        if self.snapshots.len() == MAX_SNAPSHOTS {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(Snapshot {
            grid: grid.clone(),
            history_len,
        });
    }

    /// Number of retained snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the store holds no snapshots
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Most recent snapshot captured at or before `history_len` decisions
    ///
    /// Snapshots newer than the target are discarded: after a rollback they
    /// describe grid states that no longer exist.
    pub fn rewind_to(&mut self, history_len: usize) -> Option<&Snapshot> {
        while self
            .snapshots
            .back()
            .is_some_and(|snap| snap.history_len > history_len)
        {
            self.snapshots.pop_back();
        }
        self.snapshots.back()
    }

    /// Forget all snapshots
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
