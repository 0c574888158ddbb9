//! Spatial data structures for the mosaic
//!
//! This module contains:
//! - Tile variants, sides and the immutable tile set
//! - The cell grid and its per-position state
//! - Row shifting for scrolling generation

/// Cell grid and per-position possibility state
pub mod grid;
/// One-row grid scrolling
pub mod shift;
/// Tile variants, edge codes and the tile set
pub mod tiles;

pub use grid::{Cell, Grid};
pub use shift::ShiftDirection;
pub use tiles::{EdgeCode, Side, TileSet, TileVariant};
