//! Minimum-entropy cell selection and weighted tile collapse
//!
//! The solver always works on the uncollapsed cell with the lowest weighted
//! Shannon entropy. Ties are broken twice: a degree bonus favours cells with
//! more committed neighbours, and a small uniform jitter separates exact
//! ties. Tile choice within a cell is weighted-random with a one-step
//! look-ahead that rejects candidates which would immediately strand a
//! neighbour.

use crate::analysis::patterns::TileSet;
use crate::analysis::weights::{WeightMode, tile_weight};
use crate::io::configuration::{ENTROPY_DEGREE_BONUS, ENTROPY_JITTER_SCALE};
use crate::math::entropy::weighted_entropy;
use crate::spatial::grid::{Direction, SuperpositionGrid};
use rand::Rng;
use rand::rngs::StdRng;

/// Pick the uncollapsed cell with minimum weighted entropy
///
/// Returns `None` once every cell has collapsed. The jitter term consumes
/// one random draw per candidate cell, so results are deterministic for a
/// given RNG stream.
pub fn select_lowest_entropy_cell(
    grid: &SuperpositionGrid,
    tiles: &TileSet,
    mode: WeightMode,
    rng: &mut StdRng,
) -> Option<(usize, usize)> {
    let mut best: Option<((usize, usize), f64)> = None;

    for (x, y) in grid.coordinates() {
        let Some(cell) = grid.cell(x, y) else {
            continue;
        };
        if cell.is_collapsed() {
            continue;
        }

        let mut entropy = weighted_entropy(
            cell.possible
                .iter()
                .map(|tile| tile_weight(tiles, mode, tile)),
        );
        entropy += ENTROPY_DEGREE_BONUS * grid.collapsed_neighbour_count(x, y) as f64;
        entropy += rng.random::<f64>() * ENTROPY_JITTER_SCALE;

        let replace = best.is_none_or(|(_, best_entropy)| entropy < best_entropy);
        if replace {
            best = Some(((x, y), entropy));
        }
    }

    best.map(|(coords, _)| coords)
}

/// Choose a tile for the cell at (x, y) by weighted-random priority
///
/// Candidates are ordered by `random * weight` descending and screened with
/// a one-step look-ahead: a candidate is rejected when committing it would
/// leave some uncollapsed orthogonal neighbour with no compatible tile. When
/// every candidate fails the screen the first one is accepted anyway and the
/// subsequent propagation surfaces the contradiction for the backtracker.
///
/// Returns `None` only when the cell has no possibilities at all.
pub fn choose_tile(
    grid: &SuperpositionGrid,
    tiles: &TileSet,
    mode: WeightMode,
    x: usize,
    y: usize,
    rng: &mut StdRng,
) -> Option<usize> {
    let cell = grid.cell(x, y)?;
    let mut candidates: Vec<(usize, f64)> = cell
        .possible
        .iter()
        .map(|tile| (tile, rng.random::<f64>() * tile_weight(tiles, mode, tile)))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    candidates.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    for &(tile, _) in &candidates {
        if survives_look_ahead(grid, tiles, x, y, tile) {
            return Some(tile);
        }
    }

    candidates.first().map(|&(tile, _)| tile)
}

// Would committing `tile` leave every uncollapsed orthogonal neighbour with
// at least one compatible possibility?
fn survives_look_ahead(
    grid: &SuperpositionGrid,
    tiles: &TileSet,
    x: usize,
    y: usize,
    tile: usize,
) -> bool {
    for direction in Direction::ALL {
        let Some((nx, ny)) = grid.neighbour(x, y, direction) else {
            continue;
        };
        let Some(neighbour) = grid.cell(nx, ny) else {
            continue;
        };
        if neighbour.is_collapsed() {
            continue;
        }
        let Some(permitted) = tiles.neighbours(tile, direction) else {
            continue;
        };
        if neighbour.possible.intersection(permitted).is_empty() {
            return false;
        }
    }
    true
}
