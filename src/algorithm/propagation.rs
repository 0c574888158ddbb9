use std::collections::BTreeSet;

use crate::{
    algorithm::deadend::{DeadendEvent, DeadendLog, SENTINEL_TILE},
    io::error::Result,
    spatial::grid::{Cell, Grid},
    spatial::tiles::{EdgeCode, Side, TileSet},
};

/// Set of edge codes admissible on one side of a cell
pub type EdgeSet = BTreeSet<EdgeCode>;

/// Edge codes realized on each side by the tiles a cell still admits
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SideSets {
    sets: [EdgeSet; 4],
}

impl SideSets {
    /// Codes admissible on `side`
    pub const fn get(&self, side: Side) -> &EdgeSet {
        match side {
            Side::Top => &self.sets[0],
            Side::Right => &self.sets[1],
            Side::Bottom => &self.sets[2],
            Side::Left => &self.sets[3],
        }
    }

    fn get_mut(&mut self, side: Side) -> &mut EdgeSet {
        match side {
            Side::Top => &mut self.sets[0],
            Side::Right => &mut self.sets[1],
            Side::Bottom => &mut self.sets[2],
            Side::Left => &mut self.sets[3],
        }
    }
}

/// Collect, per side, the edge codes of every tile still in `cell`
pub fn side_sets(cell: &Cell, tiles: &TileSet) -> SideSets {
    let mut sets = SideSets::default();
    for tile in cell.possibilities.iter() {
        for side in Side::ALL {
            if let Some(code) = tiles.edge_of(tile, side) {
                sets.get_mut(side).insert(code);
            }
        }
    }
    sets
}

/// Effect of restricting one neighbor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Restriction {
    /// Every tile of the neighbor was compatible, or it was already collapsed
    Unchanged,
    /// Some tiles were removed
    Narrowed {
        /// Entropy before restriction
        from: usize,
        /// Entropy after restriction
        to: usize,
    },
    /// No tile was compatible; the sentinel was substituted
    Deadend,
}

/// Filter `neighbor` to the tiles whose code on `neighbor_side` is in `allowed`
///
/// Collapsed neighbors are left alone, so a collapse or pin is never undone.
/// An emptied set becomes the sentinel singleton. `changed` is set when the
/// entropy moved and is never cleared here.
pub fn restrict_neighbor(
    neighbor: &mut Cell,
    allowed: &EdgeSet,
    neighbor_side: Side,
    tiles: &TileSet,
) -> Restriction {
    let before = neighbor.entropy();
    if before <= 1 {
        return Restriction::Unchanged;
    }

    neighbor.possibilities.retain(|tile| {
        tiles
            .edge_of(tile, neighbor_side)
            .is_some_and(|code| allowed.contains(&code))
    });

    let deadend = neighbor.possibilities.is_empty();
    if deadend {
        neighbor.possibilities.collapse_to(SENTINEL_TILE);
    }

    let after = neighbor.entropy();
    if !neighbor.changed {
        neighbor.changed = before != after;
    }

    if deadend {
        Restriction::Deadend
    } else if before == after {
        Restriction::Unchanged
    } else {
        Restriction::Narrowed {
            from: before,
            to: after,
        }
    }
}

/// Outcome of processing one cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Neighbors whose possibilities shrank without running empty
    pub narrowed: usize,
    /// Neighbors repaired with the sentinel
    pub deadends: usize,
}

/// Propagate the constraints of cell `(y, x)` to its four neighbors
///
/// Each side set of the cell restricts the facing side of the neighbor in
/// that direction, in the order top, right, bottom, left. Missing neighbors at
/// the grid boundary and collapsed neighbors are skipped. The cell is marked
/// processed afterwards.
///
/// # Errors
///
/// Returns `IndexOutOfRange` if `(y, x)` lies outside the grid
pub fn process_cell(
    grid: &mut Grid,
    tiles: &TileSet,
    y: usize,
    x: usize,
    deadends: &mut DeadendLog,
) -> Result<PropagationReport> {
    let sets = side_sets(grid.cell(y, x)?, tiles);
    let mut report = PropagationReport::default();

    for side in Side::ALL {
        let Some((ny, nx)) = grid.neighbor(y, x, side) else {
            continue;
        };
        let Some(neighbor) = grid.get_mut(ny, nx) else {
            continue;
        };

        let allowed = sets.get(side);
        let neighbor_side = side.opposite();
        match restrict_neighbor(neighbor, allowed, neighbor_side, tiles) {
            Restriction::Narrowed { .. } => report.narrowed += 1,
            Restriction::Deadend => {
                report.deadends += 1;
                deadends.record(DeadendEvent {
                    source: (y, x),
                    target: (ny, nx),
                    side: neighbor_side,
                    allowed: allowed.iter().copied().collect(),
                });
            }
            Restriction::Unchanged => {}
        }
    }

    grid.cell_mut(y, x)?.processed = true;
    Ok(report)
}
