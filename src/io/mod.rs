//! Input/output collaborators around the solver
//!
//! Everything here talks to the core only through tile sets, grids and the
//! scheduler API: sheet decoding produces edge codes, rendering reads cell
//! state, and the CLI drives the scheduler.

/// Command-line parsing and generation orchestration
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error type and helpers
pub mod error;
/// PNG export
pub mod image;
/// Terminal progress display
pub mod progress;
/// Grid-to-image rendering
pub mod render;
/// Tile sheet decoding
pub mod tilesheet;
/// Stepping capture and GIF export
pub mod visualization;
