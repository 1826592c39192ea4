//! Input/output operations: CLI, configuration, errors, images, progress

/// Command-line interface for batch processing PNG samples
pub mod cli;
/// Solver constants and runtime configuration defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Solved-grid rasterization and PNG export
pub mod image;
/// Progress bar observer for synthesis runs
pub mod progress;
