//! One-row scrolling of the grid
//!
//! Shifting keeps the solved cells and replaces the row that falls off one
//! edge with a fresh row at the other edge. The row next to the fresh one is
//! marked unprocessed so the next propagation re-validates across the seam.
//! Nothing is propagated here; callers run the scheduler afterwards.

use tracing::debug;

use crate::spatial::grid::{Cell, Grid};

/// Direction in which the grid content moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftDirection {
    /// Content moves one row down, a fresh row appears on top
    Down,
    /// Content moves one row up, a fresh row appears at the bottom
    Up,
}

impl Grid {
    /// Shift in the given direction
    pub fn shift(&mut self, direction: ShiftDirection) {
        match direction {
            ShiftDirection::Down => self.shift_down(),
            ShiftDirection::Up => self.shift_up(),
        }
    }

    /// Move every row down by one, dropping the last row
    ///
    /// Row 0 becomes fresh and row 1 is marked unprocessed.
    pub fn shift_down(&mut self) {
        let height = self.height();
        if height == 0 {
            return;
        }
        for y in (1..height).rev() {
            self.swap_rows(y, y - 1);
        }
        self.reset_row(0);
        self.mark_row_unprocessed(1);
        debug!(height, "shifted grid down");
    }

    /// Move every row up by one, dropping the first row
    ///
    /// The last row becomes fresh and the row above it is marked unprocessed.
    pub fn shift_up(&mut self) {
        let height = self.height();
        if height == 0 {
            return;
        }
        for y in 1..height {
            self.swap_rows(y - 1, y);
        }
        self.reset_row(height - 1);
        if let Some(seam) = height.checked_sub(2) {
            self.mark_row_unprocessed(seam);
        }
        debug!(height, "shifted grid up");
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a >= self.height() || b >= self.height() {
            return;
        }
        for x in 0..self.width() {
            self.cells.swap([a, x], [b, x]);
        }
    }

    fn reset_row(&mut self, y: usize) {
        let variant_count = self.variant_count();
        if y < self.height() {
            self.cells
                .row_mut(y)
                .iter_mut()
                .for_each(|cell| *cell = Cell::fresh(variant_count));
        }
    }

    fn mark_row_unprocessed(&mut self, y: usize) {
        if y < self.height() {
            self.cells
                .row_mut(y)
                .iter_mut()
                .for_each(|cell| cell.processed = false);
        }
    }
}
