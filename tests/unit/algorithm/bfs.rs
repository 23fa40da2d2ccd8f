//! Tests for multi-source breadth-first shortest paths

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use std::collections::HashSet;
    use tilegrid::algorithm::bfs::shortest_path;
    use tilegrid::spatial::grid::{Cell, CellGrid};

    fn targets(cells: &[Cell]) -> HashSet<Cell> {
        cells.iter().copied().collect()
    }

    fn adjacent(a: Cell, b: Cell) -> bool {
        a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
    }

    // Tests path length is the nearest source distance plus one, with adjacent steps
    // Verified by seeding only the first source
    #[test]
    fn test_multi_source_open_grid() {
        let grid = CellGrid::from_array(Array2::from_elem((3, 5), 1));
        let sources = [(0, 0), (0, 4)];
        let goal = targets(&[(2, 2)]);

        let path = shortest_path(&grid, sources, &goal, 1).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.steps(), 4);
        assert!(sources.contains(&path.source().unwrap()));
        assert_eq!(path.target(), Some((2, 2)));
        assert!(path.cells().windows(2).all(|w| adjacent(w[0], w[1])));
    }

    // Tests the nearer of two sources is chosen
    // Verified by preferring the first listed source
    #[test]
    fn test_nearer_source_wins() {
        let grid = CellGrid::from_array(Array2::from_elem((1, 6), 1));
        let path = shortest_path(&grid, [(0, 0), (0, 5)], &targets(&[(0, 4)]), 1).unwrap();
        assert_eq!(path.into_cells(), vec![(0, 5), (0, 4)]);
    }

    // Tests the search routes around a wall
    // Verified by allowing moves through blocked cells
    #[test]
    fn test_detour_around_wall() {
        let grid = CellGrid::from_array(array![
            [1, 0, 1],
            [1, 0, 1],
            [1, 1, 1],
        ]);
        let path = shortest_path(&grid, [(0, 0)], &targets(&[(0, 2)]), 1).unwrap();
        assert_eq!(path.len(), 7);
        assert!(path.cells().iter().all(|&c| grid.get(c) == Some(1)));
    }

    // Tests an enclosed target yields no path
    // Verified by returning the partial search frontier
    #[test]
    fn test_unreachable_target() {
        let grid = CellGrid::from_array(array![[1, 0, 1]]);
        assert!(shortest_path(&grid, [(0, 0)], &targets(&[(0, 2)]), 1).is_none());
    }

    // Tests a blocked source is skipped rather than searched from
    // Verified by seeding every listed source
    #[test]
    fn test_blocked_source_skipped() {
        let grid = CellGrid::from_array(array![[0, 1, 1]]);
        assert!(shortest_path(&grid, [(0, 0)], &targets(&[(0, 2)]), 1).is_none());

        let path = shortest_path(&grid, [(0, 0), (0, 1)], &targets(&[(0, 2)]), 1).unwrap();
        assert_eq!(path.source(), Some((0, 1)));
    }

    // Tests out-of-range sources are ignored
    // Verified by indexing with the raw source
    #[test]
    fn test_out_of_range_source_ignored() {
        let grid = CellGrid::from_array(Array2::from_elem((2, 2), 1));
        let path = shortest_path(&grid, [(9, 9), (0, 0)], &targets(&[(1, 1)]), 1).unwrap();
        assert_eq!(path.len(), 3);
    }

    // Tests a source that is also a target gives a single-cell path
    // Verified by checking targets only on neighbors
    #[test]
    fn test_source_is_target() {
        let grid = CellGrid::from_array(Array2::from_elem((2, 2), 1));
        let path = shortest_path(&grid, [(1, 1)], &targets(&[(1, 1)]), 1).unwrap();
        assert_eq!(path.cells(), &[(1, 1)]);
        assert_eq!(path.steps(), 0);
        assert!(!path.is_empty());
    }

    // Tests a relabeled exit is still reachable as a target
    // Verified by requiring targets to hold the passable value
    #[test]
    fn test_sentinel_target_reachable() {
        let grid = CellGrid::from_array(array![[3, 1, 1]]);
        let path = shortest_path(&grid, [(0, 2)], &targets(&[(0, 0)]), 1).unwrap();
        assert_eq!(path.into_cells(), vec![(0, 2), (0, 1), (0, 0)]);
    }

    // Tests non-target sentinel cells are not walked through
    // Verified by treating any non-zero cell as passable
    #[test]
    fn test_sentinel_blocks_traversal() {
        let grid = CellGrid::from_array(array![[1, 4, 1]]);
        assert!(shortest_path(&grid, [(0, 0)], &targets(&[(0, 2)]), 1).is_none());
    }

    // Tests an empty source or target set finds nothing
    // Verified by defaulting to the first grid cell
    #[test]
    fn test_empty_inputs() {
        let grid = CellGrid::from_array(Array2::from_elem((2, 2), 1));
        assert!(shortest_path(&grid, [], &targets(&[(1, 1)]), 1).is_none());
        assert!(shortest_path(&grid, [(0, 0)], &HashSet::new(), 1).is_none());
    }
}
