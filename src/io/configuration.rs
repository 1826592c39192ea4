//! Solver constants and runtime configuration defaults

// Grid and tile limits
/// Smallest allowed output grid dimension
pub const MIN_GRID_DIMENSION: usize = 3;
/// Largest allowed output grid dimension
pub const MAX_GRID_DIMENSION: usize = 50;
/// Largest allowed tile size
pub const MAX_TILE_SIZE: usize = 20;

// Snapshot and rollback settings
/// Number of collapse decisions between grid snapshots
pub const SNAPSHOT_INTERVAL: usize = 10;
/// Maximum snapshots retained (oldest dropped first)
pub const MAX_SNAPSHOTS: usize = 5;
/// Hard cap on decisions removed by a single rollback
pub const MAX_ROLLBACK_DEPTH: usize = 32;

// Entropy selection coefficients
/// Entropy bonus per collapsed orthogonal neighbour (negative favours
/// constrained cells)
pub const ENTROPY_DEGREE_BONUS: f64 = -0.1;
/// Scale of the uniform jitter added to break entropy ties
pub const ENTROPY_JITTER_SCALE: f64 = 0.001;

// Attempt budgets
/// Upper bound on synthesis attempts per request
pub const MAX_ATTEMPTS_CAP: usize = 12;
/// Upper bound on backtracks within one attempt
pub const MAX_BACKTRACKS_CAP: usize = 500;

// Seeding thresholds
/// Cell count above which the four corners are seeded
pub const CORNER_SEED_THRESHOLD: usize = 50;
/// Cell count from which scattered extra seeds are placed
pub const SCATTER_SEED_THRESHOLD: usize = 100;
/// Cell count from which a coarse seed lattice is used instead
pub const LATTICE_SEED_THRESHOLD: usize = 400;

// Observer settings
/// Iterations between observer notifications and cancellation checks
pub const YIELD_INTERVAL: usize = 8;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default pattern window size
pub const DEFAULT_TILE_SIZE: usize = 3;
/// Default output grid width in cells
pub const DEFAULT_GRID_WIDTH: usize = 24;
/// Default output grid height in cells
pub const DEFAULT_GRID_HEIGHT: usize = 24;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
