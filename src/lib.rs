//! Overlapping-model wave function collapse texture synthesizer
//!
//! The crate extracts NxN pixel patterns from a small sample image, derives
//! which patterns may sit next to each other from their overlapping strips,
//! and collapses a grid of superposition cells into a new texture that obeys
//! those adjacency rules.

#![forbid(unsafe_code)]

/// Solver core: possibility bitsets, cell selection, constraint propagation,
/// decision history, and backtracking
pub mod algorithm;
/// Sample analysis: pattern extraction, adjacency derivation, tile weighting
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for entropy calculations
pub mod math;
/// Superposition grid and direction handling
pub mod spatial;

pub use io::error::{Result, SynthesisError};
