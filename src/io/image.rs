//! Solved-grid rasterization and PNG export
//!
//! A solved grid of tile ids becomes a raster by blitting each pattern at
//! its cell position with a step of one pixel, the overlap the patterns
//! were extracted with. Overlapping writes agree by construction, so later
//! blits harmlessly overwrite earlier ones.

use crate::analysis::patterns::TileSet;
use crate::io::error::{Result, SynthesisError};
use image::{ImageBuffer, Rgba, RgbaImage};
use ndarray::Array2;
use std::path::Path;

/// Compose the output raster of a solved grid
///
/// The raster spans `(N + grid_width - 1) x (N + grid_height - 1)` pixels:
/// one pixel of fresh content per cell plus the full window of the last row
/// and column.
pub fn render(solved: &Array2<usize>, tiles: &TileSet) -> RgbaImage {
    let (grid_height, grid_width) = solved.dim();
    let n = tiles.tile_size;
    let width = (n + grid_width.saturating_sub(1)) as u32;
    let height = (n + grid_height.saturating_sub(1)) as u32;

    let mut img = ImageBuffer::new(width, height);

    for ((cell_y, cell_x), &tile_id) in solved.indexed_iter() {
        let Some(pattern) = tiles.patterns.get(tile_id) else {
            continue;
        };
        for dy in 0..n {
            for dx in 0..n {
                let px = (cell_x + dx) as u32;
                let py = (cell_y + dy) as u32;
                if px < width && py < height {
                    img.put_pixel(px, py, Rgba(pattern.pixel(dx, dy)));
                }
            }
        }
    }

    img
}

/// Write a rendered raster to disk, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be saved
pub fn export_png(img: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SynthesisError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(output_path).map_err(|e| SynthesisError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })
}
