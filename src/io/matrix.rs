//! Plain integer-matrix serialization for cell grids
//!
//! One grid row per line, values separated by commas and/or whitespace.
//! Blank lines and blank tokens (e.g. from a trailing comma) are ignored.
//! There is no header; this is the format the graph utilities consume.

use crate::io::configuration::MATRIX_SEPARATOR;
use crate::io::ensure_parent_dir;
use crate::io::error::{GridError, Result, malformed_grid};
use crate::spatial::grid::CellGrid;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Parse integer-matrix text into a rectangular grid
///
/// # Errors
///
/// Returns `GridError::MalformedGrid` if a token is not an integer, rows
/// differ in length, or the text holds no rows at all
pub fn parse_matrix(text: &str) -> Result<CellGrid> {
    let mut rows: Vec<Vec<i32>> = Vec::new();
    let mut width: Option<usize> = None;

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let row = line
            .split(|ch: char| ch == ',' || ch.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<i32>()
                    .map_err(|e| malformed_grid(line_number, &format!("'{token}': {e}")))
            })
            .collect::<Result<Vec<i32>>>()?;

        if row.is_empty() {
            continue;
        }

        match width {
            Some(expected) if expected != row.len() => {
                return Err(malformed_grid(
                    line_number,
                    &format!("expected {expected} values, found {}", row.len()),
                ));
            }
            Some(_) => {}
            None => width = Some(row.len()),
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(malformed_grid(1, &"no rows found"));
    }

    CellGrid::from_rows(&rows)
}

/// Load a grid from an integer-matrix file
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse
pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<CellGrid> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| GridError::FileSystem {
        path: path.to_path_buf(),
        operation: "read grid",
        source: e,
    })?;

    let grid = parse_matrix(&text)?;
    log::debug!(
        "Loaded {}x{} grid from {}",
        grid.rows(),
        grid.cols(),
        path.display()
    );
    Ok(grid)
}

/// Write a grid as integer-matrix text, one row per line
///
/// # Errors
///
/// Propagates any error from the writer
pub fn write_matrix<W: Write>(grid: &CellGrid, mut writer: W) -> std::io::Result<()> {
    for row in grid.cells().rows() {
        let line = row
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(MATRIX_SEPARATOR);
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}

/// Save a grid to an integer-matrix file, creating the parent directory
///
/// # Errors
///
/// Returns `GridError::FileSystem` if the directory or file cannot be
/// created or written
pub fn save_matrix<P: AsRef<Path>>(grid: &CellGrid, path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let file = fs::File::create(path).map_err(|e| GridError::FileSystem {
        path: path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;
    write_matrix(grid, BufWriter::new(file)).map_err(|e| GridError::FileSystem {
        path: path.to_path_buf(),
        operation: "write grid",
        source: e,
    })?;

    log::info!("Saved grid matrix: {}", path.display());
    Ok(())
}
