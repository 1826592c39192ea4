//! Tests for entropy-driven cell selection and look-ahead tile choice

#[cfg(test)]
mod tests {
    use crate::support::{checker_tiles, uniform_tiles};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wavetile::algorithm::propagation::force_and_propagate;
    use wavetile::algorithm::selection::{choose_tile, select_lowest_entropy_cell};
    use wavetile::analysis::weights::WeightMode;
    use wavetile::spatial::SuperpositionGrid;

    // A narrowed cell has lower entropy than untouched ones and is picked
    #[test]
    fn test_selects_most_constrained_cell() {
        let tiles = checker_tiles();
        let mut grid = SuperpositionGrid::new(5, 5, tiles.len());
        assert!(force_and_propagate(&mut grid, &tiles, 2, 2, 0).is_none());

        let mut rng = StdRng::seed_from_u64(7);
        let selected = select_lowest_entropy_cell(&grid, &tiles, WeightMode::Blended, &mut rng)
            .expect("uncollapsed cells remain");

        // The four orthogonal neighbours of the seed are the only cells
        // with a single possibility left
        let constrained = [(2, 1), (2, 3), (1, 2), (3, 2)];
        assert!(
            constrained.contains(&selected),
            "selected {selected:?} is not one of the narrowed neighbours"
        );
    }

    // Selection skips collapsed cells and reports completion with None
    #[test]
    fn test_returns_none_when_fully_collapsed() {
        let tiles = uniform_tiles();
        let mut grid = SuperpositionGrid::new(3, 3, tiles.len());
        for (x, y) in grid.coordinates().collect::<Vec<_>>() {
            grid.collapse(x, y, 0);
        }

        let mut rng = StdRng::seed_from_u64(7);
        assert!(select_lowest_entropy_cell(&grid, &tiles, WeightMode::Blended, &mut rng).is_none());
    }

    // The chosen tile always comes from the cell's possibility set
    #[test]
    fn test_choice_is_a_possibility() {
        let tiles = checker_tiles();
        let grid = SuperpositionGrid::new(4, 4, tiles.len());
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..20 {
            let tile = choose_tile(&grid, &tiles, WeightMode::Blended, 1, 1, &mut rng)
                .expect("cell has possibilities");
            assert!(tile < tiles.len());
        }
    }

    // Look-ahead rejects the tile that would strand a narrowed neighbour
    #[test]
    fn test_look_ahead_respects_neighbour_possibilities() {
        let tiles = checker_tiles();
        let mut grid = SuperpositionGrid::new(4, 4, tiles.len());
        assert!(force_and_propagate(&mut grid, &tiles, 0, 0, 0).is_none());

        // (1, 0) was narrowed to the lone tile compatible rightwards of 0;
        // choosing for (2, 0) must keep (1, 0) satisfiable
        let pinned = grid
            .cell(1, 0)
            .and_then(|cell| cell.possible.sole_member())
            .expect("narrowed neighbour");

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let tile = choose_tile(&grid, &tiles, WeightMode::Blended, 2, 0, &mut rng)
                .expect("cell has possibilities");
            let permitted = tiles
                .neighbours(tile, wavetile::spatial::grid::Direction::Left)
                .expect("rule set present");
            assert!(
                permitted.contains(pinned),
                "tile {tile} is incompatible with pinned neighbour {pinned}"
            );
        }
    }

    // An emptied cell yields no choice at all
    #[test]
    fn test_empty_cell_yields_none() {
        let tiles = checker_tiles();
        let mut grid = SuperpositionGrid::new(3, 3, tiles.len());
        if let Some(cell) = grid.cell_mut(1, 1) {
            cell.possible = wavetile::algorithm::bitset::TileBitset::new(tiles.len());
        }

        let mut rng = StdRng::seed_from_u64(5);
        assert!(choose_tile(&grid, &tiles, WeightMode::Blended, 1, 1, &mut rng).is_none());
    }
}
