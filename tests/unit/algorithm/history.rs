//! Tests for the decision log and snapshot store

#[cfg(test)]
mod tests {
    use wavetile::algorithm::history::{DecisionHistory, SnapshotStore};
    use wavetile::spatial::SuperpositionGrid;

    // Decisions append in order and truncate drops the newest first
    #[test]
    fn test_history_push_and_truncate() {
        let mut history = DecisionHistory::new();
        assert!(history.is_empty());

        history.push(0, 0, 3);
        history.push(1, 0, 1);
        history.push(2, 1, 0);
        assert_eq!(history.len(), 3);

        history.truncate(1);
        assert_eq!(history.len(), 1);
        let remaining = history.entries_from(0);
        assert_eq!(remaining.first().map(|e| (e.x, e.y, e.tile)), Some((0, 0, 3)));
    }

    // entries_from past the end yields an empty slice, not a panic
    #[test]
    fn test_entries_from_bounds() {
        let mut history = DecisionHistory::new();
        history.push(0, 0, 0);
        assert!(history.entries_from(5).is_empty());
        assert_eq!(history.entries_from(0).len(), 1);
    }

    // The store retains at most five snapshots, dropping the oldest
    #[test]
    fn test_snapshot_fifo_capacity() {
        let grid = SuperpositionGrid::new(3, 3, 2);
        let mut store = SnapshotStore::new();

        for decisions in (10..=70).step_by(10) {
            store.capture(&grid, decisions);
        }
        assert_eq!(store.len(), 5);

        // Oldest retained capture is now 30 decisions in; rewinding to 30
        // discards everything newer, and rewinding below it finds nothing
        assert_eq!(store.rewind_to(30).map(|s| s.history_len), Some(30));
        assert_eq!(store.len(), 1);
        assert!(store.rewind_to(20).is_none());
    }

    // Rewinding discards snapshots newer than the target length
    #[test]
    fn test_rewind_discards_later_snapshots() {
        let grid = SuperpositionGrid::new(3, 3, 2);
        let mut store = SnapshotStore::new();
        store.capture(&grid, 10);
        store.capture(&grid, 20);
        store.capture(&grid, 30);

        let found = store.rewind_to(25).map(|s| s.history_len);
        assert_eq!(found, Some(20));
        assert_eq!(store.len(), 2);

        // The discarded snapshot stays gone even for a later, higher target
        let found = store.rewind_to(35).map(|s| s.history_len);
        assert_eq!(found, Some(20));
    }

    // A rewind below every capture empties the store
    #[test]
    fn test_rewind_to_zero() {
        let grid = SuperpositionGrid::new(3, 3, 2);
        let mut store = SnapshotStore::new();
        store.capture(&grid, 10);

        assert!(store.rewind_to(0).is_none());
        assert!(store.is_empty());
    }

    // Snapshots are deep copies: later grid mutation leaves them intact
    #[test]
    fn test_snapshot_is_deep_copy() {
        let mut grid = SuperpositionGrid::new(3, 3, 2);
        let mut store = SnapshotStore::new();
        store.capture(&grid, 1);

        grid.collapse(1, 1, 0);

        let snapshot = store.rewind_to(1).expect("snapshot present");
        let cell = snapshot.grid.cell(1, 1).expect("cell in bounds");
        assert!(!cell.is_collapsed());
        assert_eq!(cell.possible.count(), 2);
    }
}
