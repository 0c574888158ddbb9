//! Tests for neighbor restriction and single-cell propagation

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use wfc_mosaic::algorithm::deadend::DeadendLog;
    use wfc_mosaic::algorithm::propagation::{
        EdgeSet, Restriction, process_cell, restrict_neighbor, side_sets,
    };
    use wfc_mosaic::{Cell, Grid, Side, TileSet};

    fn uniform_tiles(count: u32) -> TileSet {
        TileSet::from_edges((0..count).map(|c| (c, c, c, c))).expect("non-empty tile set")
    }

    /// Center tile plus one distinct tile that fits on each of its sides
    fn cross_tiles() -> TileSet {
        TileSet::from_edges([
            (0, 0, 0, 0),
            (1, 2, 3, 4),
            (9, 9, 1, 9),
            (9, 9, 9, 2),
            (3, 9, 9, 9),
            (9, 4, 9, 9),
        ])
        .expect("non-empty tile set")
    }

    fn edges(codes: &[u32]) -> EdgeSet {
        codes.iter().copied().collect()
    }

    // Tests per-side edge codes are collected from every admitted tile
    // Verified by reading the opposite side in side_sets
    #[test]
    fn test_side_sets_collects_codes() {
        let tiles = cross_tiles();
        let mut cell = Cell::fresh(tiles.variant_count());
        cell.possibilities.retain(|tile| tile == 1 || tile == 2);

        let sets = side_sets(&cell, &tiles);
        assert_eq!(sets.get(Side::Top), &edges(&[1, 9]));
        assert_eq!(sets.get(Side::Right), &edges(&[2, 9]));
        assert_eq!(sets.get(Side::Bottom), &edges(&[1, 3]));
        assert_eq!(sets.get(Side::Left), &edges(&[4, 9]));
    }

    // Tests narrowing reports sizes and sets the changed flag
    // Verified by comparing entropy after the flag update
    #[test]
    fn test_restrict_neighbor_narrows() {
        let tiles = uniform_tiles(3);
        let mut cell = Cell::fresh(3);

        let result = restrict_neighbor(&mut cell, &edges(&[1]), Side::Left, &tiles);

        assert_eq!(result, Restriction::Narrowed { from: 3, to: 1 });
        assert_eq!(cell.possibilities.to_vec(), vec![1]);
        assert!(cell.changed);
    }

    // Tests a fully compatible neighbor is left alone
    // Verified by setting changed unconditionally
    #[test]
    fn test_restrict_neighbor_unchanged() {
        let tiles = uniform_tiles(3);
        let mut cell = Cell::fresh(3);

        let result = restrict_neighbor(&mut cell, &edges(&[0, 1, 2]), Side::Top, &tiles);

        assert_eq!(result, Restriction::Unchanged);
        assert_eq!(cell.entropy(), 3);
        assert!(!cell.changed);
    }

    // Tests restriction never clears a pending changed flag
    // Verified by assigning the size comparison directly to changed
    #[test]
    fn test_restrict_neighbor_keeps_changed_flag() {
        let tiles = uniform_tiles(3);
        let mut cell = Cell::fresh(3);
        cell.changed = true;

        restrict_neighbor(&mut cell, &edges(&[0, 1, 2]), Side::Right, &tiles);

        assert!(cell.changed);
    }

    // Tests an emptied set is replaced by the sentinel singleton
    // Verified by leaving the set empty on deadend
    #[test]
    fn test_restrict_neighbor_deadend_substitutes_sentinel() {
        let tiles = uniform_tiles(3);
        let mut cell = Cell::fresh(3);
        cell.possibilities.retain(|tile| tile != 0);

        let result = restrict_neighbor(&mut cell, &edges(&[7]), Side::Bottom, &tiles);

        assert_eq!(result, Restriction::Deadend);
        assert_eq!(cell.possibilities.to_vec(), vec![0]);
        assert!(cell.changed);
    }

    // Tests each side restricts the facing side of the matching neighbor
    // Verified by swapping the bottom and top neighbors in process_cell
    #[test]
    fn test_process_cell_side_mapping() {
        let tiles = cross_tiles();
        let mut grid = Grid::new(3, 3, tiles.variant_count());
        grid.set_cell(1, 1, 1).expect("valid pin");
        let mut log = DeadendLog::new();

        let report = process_cell(&mut grid, &tiles, 1, 1, &mut log).expect("in range");

        assert_eq!(report.narrowed, 4);
        assert_eq!(report.deadends, 0);
        assert_eq!(grid.possibilities(0, 1).ok(), Some(vec![2]));
        assert_eq!(grid.possibilities(1, 2).ok(), Some(vec![3]));
        assert_eq!(grid.possibilities(2, 1).ok(), Some(vec![4]));
        assert_eq!(grid.possibilities(1, 0).ok(), Some(vec![5]));
        assert_eq!(grid.entropy(0, 0).ok(), Some(6));
        assert!(grid.cell(1, 1).is_ok_and(|cell| cell.processed));
        assert!(grid.cell(0, 1).is_ok_and(|cell| cell.changed && !cell.processed));
        assert!(log.is_empty());
    }

    // Tests missing neighbors at the boundary are skipped
    // Verified by wrapping neighbor coordinates around the grid
    #[test]
    fn test_process_cell_corner() {
        let tiles = uniform_tiles(2);
        let mut grid = Grid::new(2, 2, 2);
        grid.set_cell(0, 0, 1).expect("valid pin");
        let mut log = DeadendLog::new();

        let report = process_cell(&mut grid, &tiles, 0, 0, &mut log).expect("in range");

        assert_eq!(report.narrowed, 2);
        assert_eq!(grid.possibilities(0, 1).ok(), Some(vec![1]));
        assert_eq!(grid.possibilities(1, 0).ok(), Some(vec![1]));
        assert_eq!(grid.entropy(1, 1).ok(), Some(2));
    }

    // Tests an open neighbor with no fitting tile becomes a deadend
    // Verified by leaving the emptied set in place
    #[test]
    fn test_process_cell_records_deadend() {
        let tiles = uniform_tiles(4);
        let mut grid = Grid::new(1, 2, 4);
        grid.set_cell(0, 0, 1).expect("valid pin");
        if let Some(cell) = grid.get_mut(0, 1) {
            cell.possibilities.retain(|tile| tile >= 2);
        }
        let mut log = DeadendLog::new();

        let report = process_cell(&mut grid, &tiles, 0, 0, &mut log).expect("in range");

        assert_eq!(report.deadends, 1);
        assert_eq!(grid.possibilities(0, 1).ok(), Some(vec![0]));
        assert_eq!(log.count(), 1);
        let event = log.events().next().cloned().expect("one event");
        assert_eq!(event.source, (0, 0));
        assert_eq!(event.target, (0, 1));
        assert_eq!(event.side, Side::Left);
        assert_eq!(event.allowed, vec![1]);
    }

    // Tests a collapsed neighbor keeps its tile even when it does not fit
    // Verified by removing the entropy guard in restrict_neighbor
    #[test]
    fn test_process_cell_skips_collapsed_neighbor() {
        let tiles = uniform_tiles(3);
        let mut grid = Grid::new(1, 2, 3);
        grid.set_cell(0, 0, 1).expect("valid pin");
        grid.set_cell(0, 1, 2).expect("valid pin");
        let mut log = DeadendLog::new();

        let report = process_cell(&mut grid, &tiles, 0, 0, &mut log).expect("in range");

        assert_eq!(report.narrowed, 0);
        assert_eq!(report.deadends, 0);
        assert_eq!(grid.possibilities(0, 1).ok(), Some(vec![2]));
        assert!(log.is_empty());
    }

    // Tests restriction reports a collapsed cell as unchanged
    // Verified by filtering collapsed cells like open ones
    #[test]
    fn test_restrict_neighbor_collapsed_unchanged() {
        let tiles = uniform_tiles(3);
        let mut cell = Cell::fresh(3);
        cell.possibilities.collapse_to(2);

        let result = restrict_neighbor(&mut cell, &edges(&[0]), Side::Top, &tiles);

        assert_eq!(result, Restriction::Unchanged);
        assert_eq!(cell.tile(), Some(2));
        assert!(!cell.changed);
    }

    // Tests processing the same cell twice changes nothing the second time
    // Verified by restricting with the union of all codes on the second pass
    #[test]
    fn test_process_cell_idempotent() {
        let tiles = cross_tiles();
        let mut grid = Grid::new(3, 3, tiles.variant_count());
        grid.set_cell(1, 1, 1).expect("valid pin");
        let mut log = DeadendLog::new();

        process_cell(&mut grid, &tiles, 1, 1, &mut log).expect("in range");
        let before = grid.tiles();
        let report = process_cell(&mut grid, &tiles, 1, 1, &mut log).expect("in range");

        assert_eq!(report.narrowed, 0);
        assert_eq!(report.deadends, 0);
        assert_eq!(grid.tiles(), before);
    }

    // Tests every surviving neighbor tile matches some tile of the source
    // Verified by filtering on the same side instead of the facing side
    #[test]
    fn test_process_cell_neighbors_compatible() {
        let tiles = TileSet::from_edges([(0, 1, 2, 3), (1, 1, 0, 0), (2, 3, 1, 0), (3, 0, 2, 1)])
            .expect("non-empty tile set");
        let mut grid = Grid::new(3, 3, 4);
        if let Some(cell) = grid.get_mut(1, 1) {
            cell.possibilities.retain(|tile| tile == 1 || tile == 2);
        }
        let mut log = DeadendLog::new();

        process_cell(&mut grid, &tiles, 1, 1, &mut log).expect("in range");

        let source: BTreeSet<usize> = [1, 2].into_iter().collect();
        for side in Side::ALL {
            let Some((ny, nx)) = grid.neighbor(1, 1, side) else {
                continue;
            };
            let remaining = grid.possibilities(ny, nx).expect("in range");
            for tile in remaining {
                let fits = source.iter().any(|&s| {
                    let own = tiles.variant(s).expect("valid tile");
                    let other = tiles.variant(tile).expect("valid tile");
                    own.connects(side, other)
                });
                assert!(fits || log.touched((ny, nx)), "tile {tile} on {side:?} does not fit");
            }
        }
    }

    // Tests positions outside the grid are rejected
    // Verified by clamping the position instead of checking it
    #[test]
    fn test_process_cell_out_of_range() {
        let tiles = uniform_tiles(2);
        let mut grid = Grid::new(2, 2, 2);
        let mut log = DeadendLog::new();

        assert!(process_cell(&mut grid, &tiles, 2, 0, &mut log).is_err());
        assert!(process_cell(&mut grid, &tiles, 0, 5, &mut log).is_err());
    }
}
