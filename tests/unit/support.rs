//! Shared fixtures for the unit test suite

use wavetile::analysis::patterns::{Rgba, SampleImage, TileSet, extract_tiles};

/// Opaque red
pub const RED: Rgba = [255, 0, 0, 255];
/// Opaque green
pub const GREEN: Rgba = [0, 255, 0, 255];
/// Opaque blue
pub const BLUE: Rgba = [0, 0, 255, 255];
/// Opaque yellow
pub const YELLOW: Rgba = [255, 255, 0, 255];

/// 2x2 red/green checkerboard sample
pub fn checker_sample() -> SampleImage {
    SampleImage::from_raw(2, 2, vec![RED, GREEN, GREEN, RED]).expect("valid sample")
}

/// Tile set of the 2x2 checkerboard at N = 2
///
/// The checker is invariant under a diagonal shift, so only two of its
/// four toroidal windows are distinct; each is the other's unique
/// neighbour in every direction.
pub fn checker_tiles() -> TileSet {
    extract_tiles(&checker_sample(), 2).expect("valid extraction")
}

/// 2x2 sample with four distinct colours
pub fn four_colour_sample() -> SampleImage {
    SampleImage::from_raw(2, 2, vec![RED, GREEN, BLUE, YELLOW]).expect("valid sample")
}

/// Tile set of the four-colour sample at N = 2: all four toroidal shifts
/// are distinct, each with exactly one neighbour per direction
pub fn four_colour_tiles() -> TileSet {
    extract_tiles(&four_colour_sample(), 2).expect("valid extraction")
}

/// Uniform single-colour sample of the given dimensions
pub fn uniform_sample(width: usize, height: usize, colour: Rgba) -> SampleImage {
    SampleImage::from_raw(width, height, vec![colour; width * height]).expect("valid sample")
}

/// Single-tile set from a uniform blue 3x3 sample at N = 2
pub fn uniform_tiles() -> TileSet {
    extract_tiles(&uniform_sample(3, 3, BLUE), 2).expect("valid extraction")
}
