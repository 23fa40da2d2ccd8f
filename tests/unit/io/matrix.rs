//! Tests for integer-matrix parsing and writing

#[cfg(test)]
mod tests {
    use ndarray::array;
    use tempfile::TempDir;
    use tilegrid::GridError;
    use tilegrid::io::matrix::{load_matrix, parse_matrix, save_matrix, write_matrix};
    use tilegrid::spatial::grid::CellGrid;

    // Tests comma, space, and trailing-comma forms all parse to the same grid
    // Verified by splitting on commas only
    #[test]
    fn test_parse_separators() {
        let expected = array![[1, 0, 1], [0, 1, 1]];
        for text in [
            "1,0,1\n0,1,1\n",
            "1, 0, 1\n0, 1, 1",
            "1 0 1\n0 1 1\n",
            "1,0,1,\n0,1,1,\n",
            "\n1,0,1\n\n0,1,1\n\n",
        ] {
            let grid = parse_matrix(text).unwrap();
            assert_eq!(grid.cells(), &expected, "input {text:?}");
        }
    }

    // Tests negative and sentinel values survive parsing
    // Verified by parsing into an unsigned type
    #[test]
    fn test_parse_arbitrary_integers() {
        let grid = parse_matrix("-1 6 42").unwrap();
        assert_eq!(grid.cells(), &array![[-1, 6, 42]]);
    }

    // Tests a non-integer token reports its line
    // Verified by dropping bad tokens silently
    #[test]
    fn test_parse_bad_token() {
        let result = parse_matrix("1,0\n1,x\n");
        assert!(matches!(result, Err(GridError::MalformedGrid { line: 2, .. })));
    }

    // Tests ragged rows report the first short line
    // Verified by padding short rows with zeros
    #[test]
    fn test_parse_ragged_rows() {
        let result = parse_matrix("1,0,1\n\n1,0\n");
        assert!(matches!(result, Err(GridError::MalformedGrid { line: 3, .. })));
    }

    // Tests text without rows is rejected
    // Verified by returning a 0x0 grid
    #[test]
    fn test_parse_empty() {
        assert!(parse_matrix("").is_err());
        assert!(parse_matrix("\n , \n").is_err());
    }

    // Tests the writer emits one comma-separated line per row
    // Verified by writing column-major
    #[test]
    fn test_write_format() {
        let grid = CellGrid::from_array(array![[1, 0], [3, 1]]);
        let mut out = Vec::new();
        write_matrix(&grid, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1, 0\n3, 1\n");
    }

    // Tests save then load restores the grid and creates directories
    // Verified by writing a header row
    #[test]
    fn test_save_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zones").join("grid.txt");
        let grid = CellGrid::from_array(array![[0, 1, 2], [3, 4, 5]]);

        save_matrix(&grid, &path).unwrap();
        assert_eq!(load_matrix(&path).unwrap(), grid);
    }

    // Tests a missing file is a file system error
    // Verified by treating missing files as empty grids
    #[test]
    fn test_load_missing() {
        let result = load_matrix("/nonexistent/grid.txt");
        assert!(matches!(result, Err(GridError::FileSystem { .. })));
    }
}
