//! Superposition grid management
//!
//! The output is a fixed-size grid of cells. Each cell carries the set of
//! tile ids still permitted at its position plus an optional committed tile.
//! A committed cell's possibility set holds exactly its tile; an uncommitted
//! cell whose set drains empty is a contradiction.

use crate::algorithm::bitset::TileBitset;
use ndarray::Array2;

/// The four cardinal neighbour directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards smaller y
    Up,
    /// Towards larger y
    Down,
    /// Towards smaller x
    Left,
    /// Towards larger x
    Right,
}

impl Direction {
    /// All directions in index order
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Dense index for direction-keyed arrays
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    /// The direction pointing back
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit offset (dx, dy) of a step in this direction
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// One slot of the output grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Tile ids still permitted at this position
    pub possible: TileBitset,
    /// Committed tile id once the cell has collapsed
    pub decided: Option<usize>,
}

impl Cell {
    /// Whether the cell has been committed to a single tile
    pub const fn is_collapsed(&self) -> bool {
        self.decided.is_some()
    }

    /// Whether the cell has no remaining possibilities without a commitment
    pub fn is_contradicted(&self) -> bool {
        self.decided.is_none() && self.possible.is_empty()
    }
}

/// Fixed-size grid of superposition cells
#[derive(Debug, Clone)]
pub struct SuperpositionGrid {
    cells: Array2<Cell>,
    tile_count: usize,
}

impl SuperpositionGrid {
    /// Create a grid with every cell permitting every tile
    pub fn new(width: usize, height: usize, tile_count: usize) -> Self {
        let cells = Array2::from_elem(
            (height, width),
            Cell {
                possible: TileBitset::all(tile_count),
                decided: None,
            },
        );
        Self { cells, tile_count }
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.cells.dim().1
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.cells.dim().0
    }

    /// Total cell count
    pub fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Number of tile ids each possibility set ranges over
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Cell at (x, y), if in bounds
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.cells.get((y, x))
    }

    /// Mutable cell at (x, y), if in bounds
    pub fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        self.cells.get_mut((y, x))
    }

    /// Commit a cell to a single tile
    ///
    /// Shrinks the possibility set to exactly the chosen tile so the
    /// collapsed invariant holds by construction.
    pub fn collapse(&mut self, x: usize, y: usize, tile: usize) {
        let tile_count = self.tile_count;
        if let Some(cell) = self.cell_mut(x, y) {
            cell.possible = TileBitset::singleton(tile, tile_count);
            cell.decided = Some(tile);
        }
    }

    /// Reset a grid to the all-possible initial state in place
    pub fn reset(&mut self) {
        let tile_count = self.tile_count;
        for cell in &mut self.cells {
            cell.possible = TileBitset::all(tile_count);
            cell.decided = None;
        }
    }

    /// Coordinates of the orthogonal neighbour one step in `direction`
    pub fn neighbour(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.offset();
        let nx = x.checked_add_signed(dx as isize)?;
        let ny = y.checked_add_signed(dy as isize)?;
        (nx < self.width() && ny < self.height()).then_some((nx, ny))
    }

    /// Count of collapsed orthogonal neighbours of (x, y)
    pub fn collapsed_neighbour_count(&self, x: usize, y: usize) -> usize {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.neighbour(x, y, dir))
            .filter_map(|(nx, ny)| self.cell(nx, ny))
            .filter(|cell| cell.is_collapsed())
            .count()
    }

    /// Iterate over all cell coordinates in row-major order
    pub fn coordinates(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width();
        (0..self.cell_count()).map(move |i| (i % width, i / width))
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Whether every cell has collapsed
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Extract the committed tile id of every cell
    ///
    /// Returns `None` unless the grid is fully collapsed.
    pub fn solved(&self) -> Option<Array2<usize>> {
        if !self.is_fully_collapsed() {
            return None;
        }
        Some(self.cells.map(|cell| cell.decided.unwrap_or(0)))
    }

    /// Verify the collapsed-cell invariant on every cell
    ///
    /// Used by debug assertions and tests: a committed cell's possibility
    /// set must hold exactly the committed tile.
    pub fn invariant_holds(&self) -> bool {
        self.cells.iter().all(|cell| match cell.decided {
            Some(tile) => cell.possible.sole_member() == Some(tile),
            None => true,
        })
    }
}
