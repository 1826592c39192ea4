//! Spatial data structures for the output grid
//!
//! This module contains the superposition grid the solver collapses and the
//! cardinal direction handling shared with adjacency derivation.

/// Superposition grid, cells, and directions
pub mod grid;

pub use grid::SuperpositionGrid;
