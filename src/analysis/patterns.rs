//! Sample image processing and pattern extraction
//!
//! Scans the sample with a toroidal NxN window, deduplicates the windows by
//! exact pixel equality, and tallies how often each distinct pattern occurs.
//! The resulting tile set is the alphabet the solver assembles outputs from.

use crate::algorithm::bitset::TileBitset;
use crate::analysis::adjacency::build_adjacency;
use crate::io::configuration::MAX_TILE_SIZE;
use crate::io::error::{Result, SynthesisError, invalid_input};
use crate::spatial::grid::Direction;
use ndarray::Array2;
use std::collections::HashMap;
use std::path::Path;

/// One RGBA pixel; equality is channel-wise exact, alpha included
pub type Rgba = [u8; 4];

/// Sample raster the patterns are extracted from
#[derive(Debug, Clone)]
pub struct SampleImage {
    /// Pixel data indexed by (row, col) = (y, x)
    pixels: Array2<Rgba>,
}

impl SampleImage {
    /// Load a sample from a PNG file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, is not a valid image,
    /// or decodes to an empty raster
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| SynthesisError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgba_img = img.to_rgba8();

        let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);
        let mut pixels = Array2::from_elem((height, width), [0u8; 4]);
        for (x, y, pixel) in rgba_img.enumerate_pixels() {
            if let Some(dest) = pixels.get_mut((y as usize, x as usize)) {
                *dest = pixel.0;
            }
        }

        Self::from_pixels(pixels)
    }

    /// Build a sample from raw row-major RGBA pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the pixel count does not match the dimensions or
    /// the raster is empty
    pub fn from_raw(width: usize, height: usize, data: Vec<Rgba>) -> Result<Self> {
        if data.len() != width * height {
            return Err(invalid_input(
                "sample_pixels",
                &data.len(),
                &format!("expected {}x{} = {} pixels", width, height, width * height),
            ));
        }
        let pixels = Array2::from_shape_vec((height, width), data)
            .map_err(|e| invalid_input("sample_dimensions", &format!("{width}x{height}"), &e))?;
        Self::from_pixels(pixels)
    }

    fn from_pixels(pixels: Array2<Rgba>) -> Result<Self> {
        let (height, width) = pixels.dim();
        if width == 0 || height == 0 {
            return Err(invalid_input(
                "sample_dimensions",
                &format!("{width}x{height}"),
                &"sample must contain at least one pixel",
            ));
        }
        Ok(Self { pixels })
    }

    /// Sample width in pixels
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Sample height in pixels
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Pixel at (x, y) with toroidal wrapping
    pub fn pixel_wrapped(&self, x: usize, y: usize) -> Rgba {
        self.pixels
            .get((y % self.height(), x % self.width()))
            .copied()
            .unwrap_or([0; 4])
    }
}

/// A distinct NxN pattern cut from the sample
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    /// Dense id, assigned in first-seen scan order
    pub id: usize,
    /// Pixel data indexed by (row, col) within the window
    pub pixels: Array2<Rgba>,
}

impl Pattern {
    /// Window edge length
    pub fn size(&self) -> usize {
        self.pixels.dim().0
    }

    /// Pixel at (col, row) within the window
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.pixels.get((y, x)).copied().unwrap_or([0; 4])
    }
}

/// Immutable alphabet of patterns with frequencies and adjacency rules
///
/// Built once per (sample, tile size) pair. Safe to share read-only across
/// concurrent synthesis runs.
#[derive(Debug, Clone)]
pub struct TileSet {
    /// Distinct patterns indexed by id
    pub patterns: Vec<Pattern>,
    /// Occurrence count per pattern in the toroidal scan
    pub frequencies: Vec<usize>,
    /// Permitted neighbour ids per tile and direction
    pub adjacency: Vec<[TileBitset; 4]>,
    /// `1 +` total neighbour count over all four directions, per tile
    pub connectivity: Vec<usize>,
    /// Pattern window edge length
    pub tile_size: usize,
}

impl TileSet {
    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Permitted neighbours of `tile` in `direction`
    pub fn neighbours(&self, tile: usize, direction: Direction) -> Option<&TileBitset> {
        self.adjacency
            .get(tile)
            .and_then(|dirs| dirs.get(direction.index()))
    }

    /// Assemble a tile set from parts, deriving connectivity from adjacency
    ///
    /// Intended for callers that construct adjacency by hand; `extract_tiles`
    /// is the production path.
    pub fn from_parts(
        patterns: Vec<Pattern>,
        frequencies: Vec<usize>,
        adjacency: Vec<[TileBitset; 4]>,
        tile_size: usize,
    ) -> Self {
        let connectivity = derive_connectivity(&adjacency);
        Self {
            patterns,
            frequencies,
            adjacency,
            connectivity,
            tile_size,
        }
    }
}

/// Extract the distinct NxN patterns of a sample and derive their adjacency
///
/// Every origin (x, y) of the sample yields one window, read with toroidal
/// wrapping, so exactly `width * height` windows are tallied. The first
/// occurrence of a window assigns the next dense id; later occurrences only
/// increment its frequency.
///
/// # Errors
///
/// Returns `InvalidInput` when `tile_size` is zero or exceeds the supported
/// maximum
pub fn extract_tiles(sample: &SampleImage, tile_size: usize) -> Result<TileSet> {
    if tile_size == 0 || tile_size > MAX_TILE_SIZE {
        return Err(invalid_input(
            "tile_size",
            &tile_size,
            &format!("must be between 1 and {MAX_TILE_SIZE}"),
        ));
    }

    let (width, height) = (sample.width(), sample.height());
    let mut ids_by_key: HashMap<Vec<u8>, usize> = HashMap::new();
    let mut patterns = Vec::new();
    let mut frequencies = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let key = window_key(sample, x, y, tile_size);

            if let Some(&id) = ids_by_key.get(&key) {
                if let Some(count) = frequencies.get_mut(id) {
                    *count += 1;
                }
            } else {
                let id = patterns.len();
                ids_by_key.insert(key, id);
                patterns.push(Pattern {
                    id,
                    pixels: window_pixels(sample, x, y, tile_size),
                });
                frequencies.push(1);
            }
        }
    }

    let adjacency = build_adjacency(&patterns);
    let connectivity = derive_connectivity(&adjacency);

    Ok(TileSet {
        patterns,
        frequencies,
        adjacency,
        connectivity,
        tile_size,
    })
}

// Canonical byte key of one toroidal window, row-major RGBA
fn window_key(sample: &SampleImage, x: usize, y: usize, tile_size: usize) -> Vec<u8> {
    let mut key = Vec::with_capacity(tile_size * tile_size * 4);
    for dy in 0..tile_size {
        for dx in 0..tile_size {
            key.extend_from_slice(&sample.pixel_wrapped(x + dx, y + dy));
        }
    }
    key
}

fn window_pixels(sample: &SampleImage, x: usize, y: usize, tile_size: usize) -> Array2<Rgba> {
    Array2::from_shape_fn((tile_size, tile_size), |(dy, dx)| {
        sample.pixel_wrapped(x + dx, y + dy)
    })
}

fn derive_connectivity(adjacency: &[[TileBitset; 4]]) -> Vec<usize> {
    adjacency
        .iter()
        .map(|dirs| 1 + dirs.iter().map(TileBitset::count).sum::<usize>())
        .collect()
}
