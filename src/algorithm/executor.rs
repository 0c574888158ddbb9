use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::{
    algorithm::bitset::PossibilitySet,
    algorithm::deadend::DeadendLog,
    algorithm::propagation::process_cell,
    algorithm::selection::{next_collapse_cell, next_propagation_cell, reset_uncollapsed},
    io::error::{Result, check_dimension},
    spatial::grid::Grid,
    spatial::shift::ShiftDirection,
    spatial::tiles::TileSet,
};

/// Seeded random selector for the collapse draw
///
/// This is the only source of non-determinism in generation. Everything else,
/// including the choice of which cell to collapse, is a pure function of the
/// grid state.
pub struct RandomSelector<R = StdRng> {
    rng: R,
}

impl RandomSelector<StdRng> {
    /// Create a deterministic selector from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomSelector<R> {
    /// Wrap an existing random source
    pub const fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniformly pick one tile from a possibility set
    pub fn uniform_choice(&mut self, options: &PossibilitySet) -> Option<usize> {
        let count = options.count();
        if count == 0 {
            return None;
        }
        options.nth(self.rng.random_range(0..count))
    }
}

/// Which transition a single step performed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// A changed cell propagated its constraints
    Propagating,
    /// Propagation had settled and a cell was collapsed at random
    Collapsing,
    /// No cell is left to propagate or collapse
    Done,
}

/// Counters accumulated over a `generate` run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Total steps taken, including the final one reporting completion
    pub steps: usize,
    /// Steps that propagated a cell
    pub propagations: usize,
    /// Steps that collapsed a cell
    pub collapses: usize,
    /// Deadends recorded during the run
    pub deadends: usize,
}

/// Wave function collapse scheduler over an owned grid
///
/// Alternates propagation and random collapse one transition per `step` call,
/// so an embedding event loop can pace generation itself or run it to
/// completion with `generate`.
pub struct WaveCollapse<R = StdRng> {
    tiles: TileSet,
    grid: Grid,
    random_selector: RandomSelector<R>,
    last_touched: Option<(usize, usize)>,
    deadends: DeadendLog,
    /// Steps taken since creation
    pub iteration: usize,
}

impl WaveCollapse<StdRng> {
    /// Create a scheduler over a fresh `height × width` grid with a seeded
    /// random source
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `width` or `height` is zero or above
    /// `MAX_GRID_DIMENSION`
    pub fn new(tiles: TileSet, width: usize, height: usize, seed: u64) -> Result<Self> {
        Self::with_rng(tiles, width, height, StdRng::seed_from_u64(seed))
    }

    /// Create a scheduler seeded from the operating system
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `width` or `height` is zero or above
    /// `MAX_GRID_DIMENSION`
    pub fn initialize(tiles: TileSet, width: usize, height: usize) -> Result<Self> {
        Self::with_rng(tiles, width, height, StdRng::from_os_rng())
    }
}

impl<R: Rng> WaveCollapse<R> {
    /// Create a scheduler with an injected random source
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `width` or `height` is zero or above
    /// `MAX_GRID_DIMENSION`
    pub fn with_rng(tiles: TileSet, width: usize, height: usize, rng: R) -> Result<Self> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        let grid = Grid::new(height, width, tiles.variant_count());
        Ok(Self {
            tiles,
            grid,
            random_selector: RandomSelector::from_rng(rng),
            last_touched: None,
            deadends: DeadendLog::new(),
            iteration: 0,
        })
    }

    /// Access the grid
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Access the tile set
    pub const fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    /// Deadends recorded since creation or the last `clear`
    pub const fn deadends(&self) -> &DeadendLog {
        &self.deadends
    }

    /// Cell most recently propagated, cleared when generation completes
    pub const fn last_touched(&self) -> Option<(usize, usize)> {
        self.last_touched
    }

    /// Reset every cell to the full possibility set
    pub fn clear(&mut self) {
        self.grid.clear();
        self.deadends.clear();
        self.last_touched = None;
    }

    /// Pin cell `(y, x)` to `tile` to seed generation
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if the position or tile index is invalid
    pub fn set_cell(&mut self, y: usize, x: usize, tile: usize) -> Result<()> {
        self.grid.set_cell(y, x, tile)
    }

    /// Entropy of cell `(y, x)`
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if the position lies outside the grid
    pub fn entropy(&self, y: usize, x: usize) -> Result<usize> {
        self.grid.entropy(y, x)
    }

    /// Admissible tiles of cell `(y, x)`
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if the position lies outside the grid
    pub fn possibilities(&self, y: usize, x: usize) -> Result<Vec<usize>> {
        self.grid.possibilities(y, x)
    }

    /// Whether every cell holds exactly one tile
    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }

    /// Shift the grid one row down; run `generate` afterwards to fill the gap
    pub fn shift_down(&mut self) {
        self.grid.shift_down();
    }

    /// Shift the grid one row up; run `generate` afterwards to fill the gap
    pub fn shift_up(&mut self) {
        self.grid.shift_up();
    }

    /// Shift the grid in the given direction
    pub fn shift(&mut self, direction: ShiftDirection) {
        self.grid.shift(direction);
    }

    /// Perform one transition; returns `false` once generation is complete
    pub fn step(&mut self) -> bool {
        self.advance() != Phase::Done
    }

    /// Perform one transition and report which one it was
    pub fn advance(&mut self) -> Phase {
        self.iteration += 1;

        // Phase 1: propagate the lowest-entropy changed cell
        if let Some((y, x)) = next_propagation_cell(&self.grid) {
            if process_cell(&mut self.grid, &self.tiles, y, x, &mut self.deadends).is_ok() {
                self.last_touched = Some((y, x));
                return Phase::Propagating;
            }
        }

        // Phase 2: settled, so collapse the lowest-entropy open cell
        reset_uncollapsed(&mut self.grid);
        if let Some((y, x)) = next_collapse_cell(&self.grid) {
            if let Some(cell) = self.grid.get_mut(y, x) {
                if let Some(tile) = self.random_selector.uniform_choice(&cell.possibilities) {
                    cell.possibilities.collapse_to(tile);
                    cell.changed = true;
                    debug!(y, x, tile, iteration = self.iteration, "collapsed cell");
                    return Phase::Collapsing;
                }
            }
        }

        // Phase 3: nothing left to do
        self.last_touched = None;
        Phase::Done
    }

    /// Step until generation is complete
    pub fn generate(&mut self) -> GenerationSummary {
        self.generate_with(|_, _, _| {})
    }

    /// Step until generation is complete, calling `on_step` after every step
    ///
    /// The callback sees the scheduler, the phase just performed and the
    /// running totals. It is also called for the final `Done` step.
    pub fn generate_with(
        &mut self,
        mut on_step: impl FnMut(&Self, Phase, &GenerationSummary),
    ) -> GenerationSummary {
        let deadends_before = self.deadends.count();
        let mut summary = GenerationSummary::default();

        loop {
            summary.steps += 1;
            let phase = self.advance();
            match phase {
                Phase::Propagating => summary.propagations += 1,
                Phase::Collapsing => summary.collapses += 1,
                Phase::Done => {}
            }
            summary.deadends = self.deadends.count().saturating_sub(deadends_before);
            on_step(self, phase, &summary);
            if phase == Phase::Done {
                break;
            }
        }

        info!(
            steps = summary.steps,
            propagations = summary.propagations,
            collapses = summary.collapses,
            deadends = summary.deadends,
            "generation complete"
        );
        summary
    }
}
