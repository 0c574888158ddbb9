use crate::spatial::grid::Grid;

/// Find the unprocessed cell with the lowest entropy whose `changed` flag
/// equals `changed`
///
/// Cells are scanned in row-major order against a running minimum that
/// starts at the variant count. A cell replaces the current pick when its
/// entropy is less than or equal to the minimum, so among equal entropies the
/// last cell scanned wins.
pub fn find_min_entropy_cell(grid: &Grid, changed: bool) -> Option<(usize, usize)> {
    let mut min_entropy = grid.variant_count();
    let mut selected = None;

    for (position, cell) in grid.indexed_cells() {
        if cell.processed || cell.changed != changed {
            continue;
        }
        let entropy = cell.entropy();
        if entropy <= min_entropy {
            min_entropy = entropy;
            selected = Some(position);
        }
    }

    selected
}

/// Next cell whose narrowed possibilities still need propagating
pub fn next_propagation_cell(grid: &Grid) -> Option<(usize, usize)> {
    find_min_entropy_cell(grid, true)
}

/// Next cell to collapse once propagation has settled
pub fn next_collapse_cell(grid: &Grid) -> Option<(usize, usize)> {
    find_min_entropy_cell(grid, false)
}

/// Clear both flags on every uncollapsed cell
///
/// Afterwards all cells with more than one possibility are eligible for the
/// collapse scan without triggering immediate propagation. Collapsed cells keep
/// their flags. Returns the number of cells reset.
pub fn reset_uncollapsed(grid: &mut Grid) -> usize {
    let mut reset = 0;
    for cell in grid.cells_mut() {
        if cell.entropy() > 1 {
            cell.processed = false;
            cell.changed = false;
            reset += 1;
        }
    }
    reset
}
