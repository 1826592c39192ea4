//! Worklist arc-consistency propagation
//!
//! After a cell commits, its neighbours' possibility sets are narrowed so
//! every cell stays consistent with all committed decisions around it. Only
//! collapsed neighbours constrain a cell; superpositions do not restrict
//! each other. Narrowing cascades through a worklist until it settles or a
//! cell drains empty.

use crate::analysis::patterns::TileSet;
use crate::spatial::grid::{Direction, SuperpositionGrid};

/// Propagate the consequences of a commit at (x, y)
///
/// Returns the coordinates of the first contradicted cell, or `None` when
/// the grid settles consistently. Each cell is visited at most once per
/// pass; commits never happen mid-pass, so revisits could not narrow
/// further.
pub fn propagate_from(
    grid: &mut SuperpositionGrid,
    tiles: &TileSet,
    x: usize,
    y: usize,
) -> Option<(usize, usize)> {
    let width = grid.width();
    let mut queued = vec![false; grid.cell_count()];
    let mut worklist: Vec<(usize, usize)> = Vec::new();

    for direction in Direction::ALL {
        if let Some((nx, ny)) = grid.neighbour(x, y, direction) {
            if let Some(flag) = queued.get_mut(ny * width + nx) {
                *flag = true;
                worklist.push((nx, ny));
            }
        }
    }

    while let Some((cx, cy)) = worklist.pop() {
        let Some(cell) = grid.cell(cx, cy) else {
            continue;
        };
        if cell.is_collapsed() {
            continue;
        }

        // Intersect with what every committed neighbour permits here. A
        // neighbour sitting in direction d constrains this cell through its
        // rule set for the opposite direction.
        let mut narrowed = cell.possible.clone();
        for direction in Direction::ALL {
            let Some((nx, ny)) = grid.neighbour(cx, cy, direction) else {
                continue;
            };
            let Some(tile) = grid.cell(nx, ny).and_then(|nbr| nbr.decided) else {
                continue;
            };
            if let Some(permitted) = tiles.neighbours(tile, direction.opposite()) {
                narrowed.intersect_with(permitted);
            }
        }

        if narrowed.count() >= cell.possible.count() {
            continue;
        }

        let emptied = narrowed.is_empty();
        if let Some(cell) = grid.cell_mut(cx, cy) {
            cell.possible = narrowed;
        }
        if emptied {
            return Some((cx, cy));
        }

        for direction in Direction::ALL {
            let Some((nx, ny)) = grid.neighbour(cx, cy, direction) else {
                continue;
            };
            let uncollapsed = grid
                .cell(nx, ny)
                .is_some_and(|nbr| !nbr.is_collapsed());
            if !uncollapsed {
                continue;
            }
            if let Some(flag) = queued.get_mut(ny * width + nx) {
                if !*flag {
                    *flag = true;
                    worklist.push((nx, ny));
                }
            }
        }
    }

    debug_assert!(grid.invariant_holds());
    None
}

/// Force-collapse a cell and propagate the consequences
///
/// Used for seeding and history replay, where the tile is dictated rather
/// than chosen. Returns the first contradiction, as `propagate_from` does.
pub fn force_and_propagate(
    grid: &mut SuperpositionGrid,
    tiles: &TileSet,
    x: usize,
    y: usize,
    tile: usize,
) -> Option<(usize, usize)> {
    grid.collapse(x, y, tile);
    propagate_from(grid, tiles, x, y)
}
