//! Outer synthesis loop
//!
//! Drives repeated attempts over a fresh grid: seed, then collapse the
//! lowest-entropy cell, propagate, and backtrack on contradiction until the
//! grid is fully collapsed or the attempt budgets run out. The whole solver
//! is a tight synchronous loop; an optional observer and a cooperative
//! cancellation predicate are consulted only at well-defined boundaries,
//! after propagation settles, and never alter solver state.

use crate::algorithm::backtrack::Backtracker;
use crate::algorithm::history::{DecisionHistory, SnapshotStore};
use crate::algorithm::propagation::{force_and_propagate, propagate_from};
use crate::algorithm::selection::{choose_tile, select_lowest_entropy_cell};
use crate::analysis::patterns::TileSet;
use crate::analysis::weights::WeightMode;
use crate::io::configuration::{
    CORNER_SEED_THRESHOLD, LATTICE_SEED_THRESHOLD, MAX_ATTEMPTS_CAP, MAX_BACKTRACKS_CAP,
    MAX_GRID_DIMENSION, MIN_GRID_DIMENSION, SCATTER_SEED_THRESHOLD, SNAPSHOT_INTERVAL,
    YIELD_INTERVAL,
};
use crate::io::error::{Result, SynthesisError, invalid_input};
use crate::spatial::SuperpositionGrid;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Progress report handed to the observer at yield boundaries
#[derive(Clone, Copy, Debug)]
pub struct Progress {
    /// Current attempt, starting at 1
    pub attempt: usize,
    /// Attempt budget for this request
    pub max_attempts: usize,
    /// Cells committed so far in this attempt
    pub collapsed_cells: usize,
    /// Total cells in the grid
    pub total_cells: usize,
}

/// Callback invoked at solver yield boundaries
///
/// Implementations must not assume anything about call frequency beyond
/// "between iterations, after propagation"; solver behaviour is identical
/// with or without an observer installed.
pub trait Observer {
    /// Receive a progress report
    fn on_progress(&mut self, progress: Progress);
}

/// Parameters of one synthesis request
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    /// Output grid width in cells
    pub grid_width: usize,
    /// Output grid height in cells
    pub grid_height: usize,
    /// Seed for the injected RNG; equal inputs and seed reproduce the output
    pub seed: u64,
    /// Weight blend used for entropy and collapse choice
    pub weight_mode: WeightMode,
}

impl SolverConfig {
    /// Validate grid dimensions against the supported range
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when either dimension is out of range
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("grid_width", self.grid_width),
            ("grid_height", self.grid_height),
        ] {
            if !(MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION).contains(&value) {
                return Err(invalid_input(
                    name,
                    &value,
                    &format!("must be between {MIN_GRID_DIMENSION} and {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(())
    }
}

// Per-attempt bookkeeping bundled to keep the loop body readable
struct AttemptState {
    grid: SuperpositionGrid,
    history: DecisionHistory,
    snapshots: SnapshotStore,
    backtracker: Backtracker,
    backtracks: usize,
}

/// Texture synthesizer collapsing one grid against a shared tile set
///
/// The tile set is borrowed immutably, so one set can feed any number of
/// synthesizers on independent grids.
pub struct Synthesizer<'a> {
    tiles: &'a TileSet,
    config: SolverConfig,
    rng: StdRng,
    observer: Option<Box<dyn Observer + 'a>>,
    cancel: Option<Box<dyn Fn() -> bool + 'a>>,
    last_contradiction: Option<(usize, usize)>,
}

impl<'a> Synthesizer<'a> {
    /// Create a synthesizer for the given tile set and configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the configuration is out of range or the
    /// tile set is empty
    pub fn new(tiles: &'a TileSet, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        if tiles.is_empty() {
            return Err(invalid_input(
                "tile_set",
                &0,
                &"tile set must contain at least one pattern",
            ));
        }

        Ok(Self {
            tiles,
            config,
            rng: StdRng::seed_from_u64(config.seed),
            observer: None,
            cancel: None,
            last_contradiction: None,
        })
    }

    /// Install a progress observer
    pub fn set_observer(&mut self, observer: Box<dyn Observer + 'a>) {
        self.observer = Some(observer);
    }

    /// Install a cooperative cancellation predicate
    ///
    /// The predicate is polled at yield boundaries; returning true makes
    /// `synthesize` stop with `Cancelled` and drop all partial state.
    pub fn set_cancellation(&mut self, cancel: Box<dyn Fn() -> bool + 'a>) {
        self.cancel = Some(cancel);
    }

    /// Attempt budget for this request
    pub fn max_attempts(&self) -> usize {
        let cells = self.cell_count();
        MAX_ATTEMPTS_CAP.min(4 + cells.div_ceil(15))
    }

    /// Backtrack budget per attempt
    pub fn max_backtracks(&self) -> usize {
        MAX_BACKTRACKS_CAP.min(self.cell_count() * 10)
    }

    /// Iteration budget per attempt
    pub fn max_iterations(&self) -> usize {
        3 * self.cell_count()
    }

    fn cell_count(&self) -> usize {
        self.config.grid_width * self.config.grid_height
    }

    /// Run the synthesis request to completion
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` when every attempt exhausts its budgets
    /// without a consistent assignment, or `Cancelled` when the host
    /// predicate fires
    pub fn synthesize(&mut self) -> Result<Array2<usize>> {
        let max_attempts = self.max_attempts();

        for attempt in 1..=max_attempts {
            let mut state = AttemptState {
                grid: SuperpositionGrid::new(
                    self.config.grid_width,
                    self.config.grid_height,
                    self.tiles.len(),
                ),
                history: DecisionHistory::new(),
                snapshots: SnapshotStore::new(),
                backtracker: Backtracker::new(),
                backtracks: 0,
            };

            if !self.seed_attempt(&mut state) {
                continue;
            }

            if let Some(solved) = self.run_attempt(&mut state, attempt, max_attempts)? {
                return Ok(solved);
            }
        }

        Err(SynthesisError::GenerationFailed {
            attempts: max_attempts,
            grid_dimensions: (self.config.grid_width, self.config.grid_height),
            tile_count: self.tiles.len(),
            last_contradiction: self.last_contradiction,
        })
    }

    // Place the initial forced collapses. Returns false when a seed
    // contradicts, which ends the attempt without touching its budgets.
    fn seed_attempt(&mut self, state: &mut AttemptState) -> bool {
        let (width, height) = (self.config.grid_width, self.config.grid_height);
        let cells = self.cell_count();

        let first = (
            self.rng.random_range(0..width),
            self.rng.random_range(0..height),
        );
        let first_tile = self.rng.random_range(0..self.tiles.len());
        if !self.commit_seed(state, first.0, first.1, Some(first_tile)) {
            return false;
        }

        let mut extra: Vec<(usize, usize)> = Vec::new();
        if cells > CORNER_SEED_THRESHOLD {
            extra.extend([
                (0, 0),
                (width - 1, 0),
                (0, height - 1),
                (width - 1, height - 1),
            ]);
        }
        if (SCATTER_SEED_THRESHOLD..LATTICE_SEED_THRESHOLD).contains(&cells) {
            let scatter = ((cells as f64).sqrt() / 2.0).round() as usize;
            for _ in 0..scatter {
                extra.push((
                    self.rng.random_range(0..width),
                    self.rng.random_range(0..height),
                ));
            }
        } else if cells >= LATTICE_SEED_THRESHOLD {
            let spacing = (((cells as f64).sqrt() / 5.0).round() as usize).max(1);
            for y in (0..height).step_by(spacing) {
                for x in (0..width).step_by(spacing) {
                    extra.push((x, y));
                }
            }
        }

        for (x, y) in extra {
            if !self.commit_seed(state, x, y, None) {
                return false;
            }
        }
        true
    }

    // Force one seed cell. A dictated tile is used as-is; otherwise a tile
    // is drawn uniformly from the cell's remaining possibilities. Cells
    // already collapsed by earlier seed propagation are left alone.
    fn commit_seed(
        &mut self,
        state: &mut AttemptState,
        x: usize,
        y: usize,
        tile: Option<usize>,
    ) -> bool {
        let Some(cell) = state.grid.cell(x, y) else {
            return true;
        };
        if cell.is_collapsed() {
            return true;
        }

        let tile = match tile {
            Some(tile) => tile,
            None => {
                let remaining = cell.possible.to_vec();
                if remaining.is_empty() {
                    return false;
                }
                let pick = self.rng.random_range(0..remaining.len());
                remaining.get(pick).copied().unwrap_or(0)
            }
        };

        let contradiction = force_and_propagate(&mut state.grid, self.tiles, x, y, tile);
        state.history.push(x, y, tile);
        if state.history.len() % SNAPSHOT_INTERVAL == 0 {
            state.snapshots.capture(&state.grid, state.history.len());
        }

        if let Some(pos) = contradiction {
            self.last_contradiction = Some(pos);
            return false;
        }
        true
    }

    // One attempt's main loop. Ok(None) means the budgets ran out and the
    // next attempt should start.
    fn run_attempt(
        &mut self,
        state: &mut AttemptState,
        attempt: usize,
        max_attempts: usize,
    ) -> Result<Option<Array2<usize>>> {
        let max_iterations = self.max_iterations();
        let max_backtracks = self.max_backtracks();

        for iteration in 1..=max_iterations {
            if iteration % YIELD_INTERVAL == 0 {
                self.yield_point(&state.grid, attempt, max_attempts)?;
            }

            let Some((x, y)) = select_lowest_entropy_cell(
                &state.grid,
                self.tiles,
                self.config.weight_mode,
                &mut self.rng,
            ) else {
                debug_assert!(state.grid.invariant_holds());
                return Ok(state.grid.solved());
            };

            let chosen = choose_tile(
                &state.grid,
                self.tiles,
                self.config.weight_mode,
                x,
                y,
                &mut self.rng,
            );

            let contradiction = match chosen {
                Some(tile) => {
                    state.grid.collapse(x, y, tile);
                    state.history.push(x, y, tile);
                    if state.history.len() % SNAPSHOT_INTERVAL == 0 {
                        state.snapshots.capture(&state.grid, state.history.len());
                    }
                    propagate_from(&mut state.grid, self.tiles, x, y)
                }
                // An already-empty cell is a contradiction the propagator
                // has not been asked about yet
                None => Some((x, y)),
            };

            match contradiction {
                None => state.backtracker.record_success(),
                Some(pos) => {
                    if !self.recover(state, pos, max_backtracks) {
                        return Ok(None);
                    }
                }
            }
        }

        Ok(None)
    }

    // Backtrack until the grid is consistent again or the budget is gone.
    // Replay can itself contradict, which escalates the pressure and rolls
    // back further.
    fn recover(
        &mut self,
        state: &mut AttemptState,
        mut contradiction: (usize, usize),
        max_backtracks: usize,
    ) -> bool {
        loop {
            self.last_contradiction = Some(contradiction);
            state.backtracker.record_contradiction();

            if state.backtracks >= max_backtracks || state.history.is_empty() {
                return false;
            }
            state.backtracks += 1;

            match state.backtracker.rollback(
                &mut state.grid,
                self.tiles,
                &mut state.history,
                &mut state.snapshots,
            ) {
                None => return true,
                Some(pos) => contradiction = pos,
            }
        }
    }

    // Observer notification and cancellation check; only called after
    // propagation has settled
    fn yield_point(
        &mut self,
        grid: &SuperpositionGrid,
        attempt: usize,
        max_attempts: usize,
    ) -> Result<()> {
        if self.cancel.as_ref().is_some_and(|cancel| cancel()) {
            return Err(SynthesisError::Cancelled);
        }
        if let Some(observer) = &mut self.observer {
            observer.on_progress(Progress {
                attempt,
                max_attempts,
                collapsed_cells: grid.collapsed_count(),
                total_cells: grid.cell_count(),
            });
        }
        Ok(())
    }
}

/// Synthesize a solved grid of tile ids in one call
///
/// Convenience wrapper over [`Synthesizer`] for hosts that need no observer
/// or cancellation hook.
///
/// # Errors
///
/// Propagates `InvalidInput`, `GenerationFailed`, and `Cancelled` from the
/// underlying synthesizer
pub fn synthesize(
    tiles: &TileSet,
    grid_width: usize,
    grid_height: usize,
    seed: u64,
) -> Result<Array2<usize>> {
    let config = SolverConfig {
        grid_width,
        grid_height,
        seed,
        weight_mode: WeightMode::default(),
    };
    Synthesizer::new(tiles, config)?.synthesize()
}
