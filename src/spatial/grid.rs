//! Grid of cells holding the per-position possibility state
//!
//! Every cell starts with the full tile set and only ever shrinks during
//! propagation and collapse. Whole rows are replaced when the grid shifts, and
//! `clear` resets every cell at once. Cells are stored in a row-major
//! `Array2` addressed as `(y, x)`.

use ndarray::Array2;

use crate::algorithm::bitset::PossibilitySet;
use crate::io::error::{MosaicError, Result, check_index, out_of_range};
use crate::spatial::tiles::Side;

/// State of a single grid position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Tile indices still admissible at this position
    pub possibilities: PossibilitySet,
    /// The cell has already propagated its constraints in the current sweep
    pub processed: bool,
    /// The possibilities were narrowed since the cell was last processed
    pub changed: bool,
}

impl Cell {
    /// A cell admitting every tile, not processed and not changed
    pub fn fresh(variant_count: usize) -> Self {
        Self {
            possibilities: PossibilitySet::all(variant_count),
            processed: false,
            changed: false,
        }
    }

    /// Number of admissible tiles
    pub fn entropy(&self) -> usize {
        self.possibilities.count()
    }

    /// Whether the cell is fully determined
    pub fn is_collapsed(&self) -> bool {
        self.entropy() == 1
    }

    /// The single remaining tile of a collapsed cell
    pub fn tile(&self) -> Option<usize> {
        if self.is_collapsed() {
            self.possibilities.nth(0)
        } else {
            None
        }
    }

    /// Pin the cell to one tile and queue it for propagation
    pub fn pin(&mut self, tile: usize) {
        self.possibilities.collapse_to(tile);
        self.changed = true;
        self.processed = false;
    }
}

/// Fixed-size two-dimensional array of cells
#[derive(Clone, Debug)]
pub struct Grid {
    /// Cells indexed by `[y, x]`
    pub(crate) cells: Array2<Cell>,
    variant_count: usize,
}

impl Grid {
    /// Create a grid of `height` rows and `width` columns of fresh cells
    pub fn new(height: usize, width: usize, variant_count: usize) -> Self {
        Self {
            cells: Array2::from_shape_fn((height, width), |_| Cell::fresh(variant_count)),
            variant_count,
        }
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Grid dimensions as `(height, width)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Number of tile variants every fresh cell admits
    pub const fn variant_count(&self) -> usize {
        self.variant_count
    }

    /// Reset every cell to the full possibility set
    pub fn clear(&mut self) {
        let variant_count = self.variant_count;
        self.cells
            .iter_mut()
            .for_each(|cell| *cell = Cell::fresh(variant_count));
    }

    /// Validate a position
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `y` or `x` lies outside the grid
    pub fn check_position(&self, y: usize, x: usize) -> Result<(usize, usize)> {
        check_index("row", y, self.height())?;
        check_index("column", x, self.width())?;
        Ok((y, x))
    }

    /// Borrow the cell at `(y, x)`
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if the position lies outside the grid
    pub fn cell(&self, y: usize, x: usize) -> Result<&Cell> {
        let (height, width) = self.dimensions();
        self.cells
            .get([y, x])
            .ok_or_else(|| position_error(y, x, height, width))
    }

    /// Mutably borrow the cell at `(y, x)`
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if the position lies outside the grid
    pub fn cell_mut(&mut self, y: usize, x: usize) -> Result<&mut Cell> {
        let (height, width) = self.dimensions();
        self.cells
            .get_mut([y, x])
            .ok_or_else(|| position_error(y, x, height, width))
    }

    /// Cell lookup that treats out-of-range positions as absent
    pub fn get(&self, y: usize, x: usize) -> Option<&Cell> {
        self.cells.get([y, x])
    }

    /// Mutable cell lookup that treats out-of-range positions as absent
    pub fn get_mut(&mut self, y: usize, x: usize) -> Option<&mut Cell> {
        self.cells.get_mut([y, x])
    }

    /// Position of the neighbor on `side`, if it exists
    pub fn neighbor(&self, y: usize, x: usize, side: Side) -> Option<(usize, usize)> {
        let (dy, dx) = side.offset();
        let ny = y.checked_add_signed(dy)?;
        let nx = x.checked_add_signed(dx)?;
        (ny < self.height() && nx < self.width()).then_some((ny, nx))
    }

    /// Pin the cell at `(y, x)` to `tile`
    ///
    /// The cell is marked changed and not processed so that the next step
    /// propagates its constraints.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if the position lies outside the grid or the
    /// tile index is not below the variant count
    pub fn set_cell(&mut self, y: usize, x: usize, tile: usize) -> Result<()> {
        check_index("tile", tile, self.variant_count)?;
        self.cell_mut(y, x)?.pin(tile);
        Ok(())
    }

    /// Entropy of the cell at `(y, x)`
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if the position lies outside the grid
    pub fn entropy(&self, y: usize, x: usize) -> Result<usize> {
        self.cell(y, x).map(Cell::entropy)
    }

    /// Admissible tile indices of the cell at `(y, x)` in ascending order
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if the position lies outside the grid
    pub fn possibilities(&self, y: usize, x: usize) -> Result<Vec<usize>> {
        self.cell(y, x).map(|cell| cell.possibilities.to_vec())
    }

    /// Iterate `((y, x), cell)` pairs in row-major order
    pub fn indexed_cells(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> + '_ {
        self.cells.indexed_iter()
    }

    /// Iterate cells mutably in row-major order
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> + '_ {
        self.cells.iter_mut()
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether every cell holds exactly one tile
    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Tile of every collapsed cell, `None` elsewhere, as nested rows
    pub fn tiles(&self) -> Vec<Vec<Option<usize>>> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(Cell::tile).collect())
            .collect()
    }
}

/// Range error naming the axis that is out of bounds, rows first
const fn position_error(y: usize, x: usize, height: usize, width: usize) -> MosaicError {
    if y >= height {
        out_of_range("row", y, height)
    } else {
        out_of_range("column", x, width)
    }
}
