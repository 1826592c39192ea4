//! Tests for the outer synthesis loop and its budgets

#[cfg(test)]
mod tests {
    use crate::support::{checker_tiles, uniform_tiles};
    use std::cell::Cell;
    use wavetile::SynthesisError;
    use wavetile::algorithm::executor::{
        Observer, Progress, SolverConfig, Synthesizer, synthesize,
    };
    use wavetile::analysis::weights::WeightMode;

    fn config(width: usize, height: usize, seed: u64) -> SolverConfig {
        SolverConfig {
            grid_width: width,
            grid_height: height,
            seed,
            weight_mode: WeightMode::Blended,
        }
    }

    // Budgets follow the documented formulas for a 3x3 grid
    #[test]
    fn test_budget_formulas() {
        let tiles = uniform_tiles();
        let synthesizer = Synthesizer::new(&tiles, config(3, 3, 1)).expect("valid config");
        assert_eq!(synthesizer.max_attempts(), 5);
        assert_eq!(synthesizer.max_backtracks(), 90);
        assert_eq!(synthesizer.max_iterations(), 27);
    }

    // Large grids saturate the attempt and backtrack caps
    #[test]
    fn test_budget_caps() {
        let tiles = uniform_tiles();
        let synthesizer = Synthesizer::new(&tiles, config(50, 50, 1)).expect("valid config");
        assert_eq!(synthesizer.max_attempts(), 12);
        assert_eq!(synthesizer.max_backtracks(), 500);
        assert_eq!(synthesizer.max_iterations(), 7500);
    }

    // Out-of-range grid dimensions are rejected up front
    #[test]
    fn test_rejects_invalid_dimensions() {
        let tiles = uniform_tiles();
        for (width, height) in [(2, 10), (10, 2), (51, 10), (10, 51)] {
            let result = Synthesizer::new(&tiles, config(width, height, 1));
            assert!(
                matches!(result, Err(SynthesisError::InvalidInput { .. })),
                "{width}x{height} accepted"
            );
        }
    }

    // A trivial single-tile set solves a small grid with every cell the
    // same tile
    #[test]
    fn test_single_tile_solves_trivially() {
        let tiles = uniform_tiles();
        let solved = synthesize(&tiles, 3, 3, 42).expect("solvable");
        assert_eq!(solved.dim(), (3, 3));
        assert!(solved.iter().all(|&tile| tile == 0));
    }

    // The checkerboard set solves and every adjacent pair obeys the rules
    #[test]
    fn test_checkerboard_solution_is_consistent() {
        let tiles = checker_tiles();
        let solved = synthesize(&tiles, 6, 6, 42).expect("solvable");

        for ((y, x), &tile) in solved.indexed_iter() {
            if let Some(&right) = solved.get((y, x + 1)) {
                let permitted = tiles
                    .neighbours(tile, wavetile::spatial::grid::Direction::Right)
                    .expect("rule set present");
                assert!(permitted.contains(right), "({x}, {y}) -> right");
            }
            if let Some(&down) = solved.get((y + 1, x)) {
                let permitted = tiles
                    .neighbours(tile, wavetile::spatial::grid::Direction::Down)
                    .expect("rule set present");
                assert!(permitted.contains(down), "({x}, {y}) -> down");
            }
        }
    }

    // Equal inputs and seed reproduce identical output
    #[test]
    fn test_reproducible_for_fixed_seed() {
        let tiles = checker_tiles();
        let first = synthesize(&tiles, 7, 7, 1234).expect("solvable");
        let second = synthesize(&tiles, 7, 7, 1234).expect("solvable");
        assert_eq!(first, second);
    }

    // The cancellation predicate stops synthesis at a yield boundary
    #[test]
    fn test_cancellation_is_observed() {
        let tiles = checker_tiles();
        let mut synthesizer = Synthesizer::new(&tiles, config(40, 40, 9)).expect("valid config");
        synthesizer.set_cancellation(Box::new(|| true));

        let result = synthesizer.synthesize();
        assert!(matches!(result, Err(SynthesisError::Cancelled)));
    }

    // Observer reports are monotone in collapsed cells and bounded by the
    // grid size; installing one does not change the solution
    #[test]
    fn test_observer_reports_progress() {
        struct Recorder<'a> {
            max_seen: &'a Cell<usize>,
            calls: &'a Cell<usize>,
        }
        impl Observer for Recorder<'_> {
            fn on_progress(&mut self, progress: Progress) {
                assert!(progress.collapsed_cells <= progress.total_cells);
                assert!(progress.attempt >= 1);
                assert!(progress.attempt <= progress.max_attempts);
                self.max_seen
                    .set(self.max_seen.get().max(progress.collapsed_cells));
                self.calls.set(self.calls.get() + 1);
            }
        }

        let tiles = uniform_tiles();
        let max_seen = Cell::new(0);
        let calls = Cell::new(0);

        let mut observed = Synthesizer::new(&tiles, config(10, 10, 77)).expect("valid config");
        observed.set_observer(Box::new(Recorder {
            max_seen: &max_seen,
            calls: &calls,
        }));
        let with_observer = observed.synthesize().expect("solvable");

        assert!(calls.get() > 0);
        assert!(max_seen.get() <= 100);

        let without_observer = synthesize(&tiles, 10, 10, 77).expect("solvable");
        assert_eq!(with_observer, without_observer);
    }

    // An empty tile set is rejected as invalid input
    #[test]
    fn test_rejects_empty_tile_set() {
        let tiles = wavetile::analysis::patterns::TileSet::from_parts(vec![], vec![], vec![], 1);
        let result = Synthesizer::new(&tiles, config(3, 3, 1));
        assert!(matches!(result, Err(SynthesisError::InvalidInput { .. })));
    }
}
