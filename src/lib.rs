//! Edge-matched tile mosaic generation by wave function collapse
//!
//! Every grid cell starts with the full set of tile variants. Constraints from
//! each cell's admissible edge codes are propagated to its neighbors, and when
//! propagation settles the lowest-entropy open cell is collapsed at random.
//! Contradictions are repaired in place with a sentinel tile instead of
//! backtracking. The solved grid can scroll one row at a time and only the
//! new boundary is re-solved.

#![forbid(unsafe_code)]

/// Propagation, selection and the step scheduler
pub mod algorithm;
/// Tile sheet decoding, rendering, export and the command-line interface
pub mod io;
/// Tile set, grid and row shifting
pub mod spatial;

pub use algorithm::executor::{GenerationSummary, Phase, WaveCollapse};
pub use io::error::{MosaicError, Result};
pub use spatial::{Cell, Grid, ShiftDirection, Side, TileSet, TileVariant};
