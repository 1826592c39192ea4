//! Analysis modules for pattern extraction and adjacency derivation

/// Overlap-compatibility adjacency rules between extracted patterns
pub mod adjacency;
/// Pattern extraction and sample image processing
pub mod patterns;
/// Tile weight blending for selection and collapse
pub mod weights;

pub use patterns::TileSet;
