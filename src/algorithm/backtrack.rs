//! Adaptive multi-step rollback
//!
//! On contradiction the solver removes a run of recent decisions and
//! restores the nearest snapshot, replaying whatever history lies past the
//! captured point. The rollback depth adapts to how often contradictions
//! have been hitting: transient misfits cost two steps, persistent traps
//! discard enough context to reach a genuinely different search region.

use crate::algorithm::history::{DecisionHistory, SnapshotStore};
use crate::algorithm::propagation::force_and_propagate;
use crate::analysis::patterns::TileSet;
use crate::io::configuration::MAX_ROLLBACK_DEPTH;
use crate::spatial::grid::SuperpositionGrid;

/// Rollback controller tracking contradiction pressure
#[derive(Debug, Default)]
pub struct Backtracker {
    recent_contradictions: usize,
}

impl Backtracker {
    /// Create a controller with no contradiction pressure
    pub const fn new() -> Self {
        Self {
            recent_contradictions: 0,
        }
    }

    /// Note a successful collapse step, easing the pressure
    pub fn record_success(&mut self) {
        self.recent_contradictions = self.recent_contradictions.saturating_sub(1);
    }

    /// Note a contradiction, raising the pressure
    pub fn record_contradiction(&mut self) {
        self.recent_contradictions += 1;
    }

    /// Current contradiction pressure
    pub const fn recent_contradictions(&self) -> usize {
        self.recent_contradictions
    }

    /// Decisions to remove for the next rollback
    ///
    /// Escalates 2 → 4 → 8 as contradictions accumulate; past that, up to
    /// the depth cap or half the history, whichever is smaller. Never more
    /// than the history holds, and at least one entry when any exist.
    pub fn rollback_depth(&self, history_len: usize) -> usize {
        let scheduled = match self.recent_contradictions {
            0..=1 => 2,
            2..=3 => 4,
            4..=6 => 8,
            _ => MAX_ROLLBACK_DEPTH.min(history_len / 2),
        };
        scheduled.clamp(usize::from(history_len > 0), history_len)
    }

    /// Undo recent decisions and rebuild a consistent grid
    ///
    /// Truncates the history by the adaptive depth, restores the nearest
    /// snapshot at or before the new length (or resets the grid when none
    /// remains), and replays the decisions past the restored point. Returns
    /// the coordinates of a contradiction hit during replay, which sends the
    /// outer loop straight back here with higher pressure.
    pub fn rollback(
        &mut self,
        grid: &mut SuperpositionGrid,
        tiles: &TileSet,
        history: &mut DecisionHistory,
        snapshots: &mut SnapshotStore,
    ) -> Option<(usize, usize)> {
        let steps = self.rollback_depth(history.len());
        let target_len = history.len().saturating_sub(steps);
        history.truncate(target_len);

        let replay_start = match snapshots.rewind_to(target_len) {
            Some(snapshot) => {
                *grid = snapshot.grid.clone();
                snapshot.history_len
            }
            None => {
                grid.reset();
                0
            }
        };

        let replay: Vec<_> = history.entries_from(replay_start).to_vec();
        for entry in replay {
            if let Some(contradiction) =
                force_and_propagate(grid, tiles, entry.x, entry.y, entry.tile)
            {
                return Some(contradiction);
            }
        }
        None
    }
}
