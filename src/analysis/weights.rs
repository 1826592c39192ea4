//! Tile weight blending for entropy calculation and collapse choice

use crate::analysis::patterns::TileSet;

/// How sample frequency and connectivity combine into a tile's weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WeightMode {
    /// `(3 * frequency + connectivity) / 4`: sample frequency dominates,
    /// connectivity contributes mildly
    #[default]
    Blended,
    /// Sample frequency alone
    FrequencyOnly,
    /// Connectivity alone
    ConnectivityOnly,
}

/// Selection weight of one tile under the given mode
///
/// Frequency is the pattern's occurrence count in the sample scan;
/// connectivity is one plus its total neighbour count over the four
/// directions. Both are at least one for any extracted tile, so weights are
/// strictly positive.
pub fn tile_weight(tiles: &TileSet, mode: WeightMode, tile: usize) -> f64 {
    let frequency = tiles.frequencies.get(tile).copied().unwrap_or(0) as f64;
    let connectivity = tiles.connectivity.get(tile).copied().unwrap_or(0) as f64;

    match mode {
        WeightMode::Blended => 3.0_f64.mul_add(frequency, connectivity) / 4.0,
        WeightMode::FrequencyOnly => frequency,
        WeightMode::ConnectivityOnly => connectivity,
    }
}
