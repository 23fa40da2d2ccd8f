//! Tabular grid CSV: `row,col,passable,encounter`, one record per tile

use crate::io::configuration::GRID_CSV_HEADER;
use crate::io::ensure_parent_dir;
use crate::io::error::{GridError, Result, malformed_grid};
use crate::spatial::tiles::LabelGrid;
use ndarray::Array2;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write tile decisions in row-major order with a header row
///
/// # Errors
///
/// Propagates any error from the writer
pub fn write_labels_csv<W: Write>(grid: &LabelGrid, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "{GRID_CSV_HEADER}")?;
    for record in grid.records() {
        writeln!(
            writer,
            "{},{},{},{}",
            record.row,
            record.col,
            u8::from(record.passable),
            u8::from(record.encounter)
        )?;
    }
    writer.flush()
}

/// Save tile decisions to a CSV file, creating the parent directory
///
/// # Errors
///
/// Returns `GridError::FileSystem` if the file cannot be created or written
pub fn save_labels_csv<P: AsRef<Path>>(grid: &LabelGrid, path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let file = fs::File::create(path).map_err(|e| GridError::FileSystem {
        path: path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;
    write_labels_csv(grid, BufWriter::new(file)).map_err(|e| GridError::FileSystem {
        path: path.to_path_buf(),
        operation: "write labels",
        source: e,
    })?;

    log::info!("Saved grid CSV: {}", path.display());
    Ok(())
}

/// Parse tabular grid CSV text back into a label grid
///
/// Records may appear in any order but must cover every tile of the
/// grid exactly once. The tile size is not stored in the table and must
/// be supplied.
///
/// # Errors
///
/// Returns `GridError::MalformedGrid` if the header is wrong, a record
/// does not have four fields, a flag is not `0`/`1`, a tile appears twice,
/// or the records do not fill the grid their indices imply
pub fn parse_labels_csv(text: &str, tile_size: usize) -> Result<LabelGrid> {
    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    match lines.next() {
        Some((_, header)) if header.trim() == GRID_CSV_HEADER => {}
        Some((index, header)) => {
            return Err(malformed_grid(
                index + 1,
                &format!("expected header '{GRID_CSV_HEADER}', found '{}'", header.trim()),
            ));
        }
        None => return Err(malformed_grid(1, &"missing header")),
    }

    let mut records = Vec::new();
    let (mut rows, mut cols) = (0usize, 0usize);
    for (index, line) in lines {
        let line_number = index + 1;
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let &[row, col, passable, encounter] = fields.as_slice() else {
            return Err(malformed_grid(
                line_number,
                &format!("expected 4 fields, found {}", fields.len()),
            ));
        };

        let index_field = |value: &str| {
            value
                .parse::<usize>()
                .map_err(|e| malformed_grid(line_number, &format!("'{value}': {e}")))
        };
        let flag_field = |value: &str| match value {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(malformed_grid(
                line_number,
                &format!("flag must be 0 or 1, found '{other}'"),
            )),
        };

        let (row, col) = (index_field(row)?, index_field(col)?);
        let extent = |index: usize| {
            index.checked_add(1).ok_or_else(|| {
                malformed_grid(line_number, &format!("index {index} is too large"))
            })
        };
        rows = rows.max(extent(row)?);
        cols = cols.max(extent(col)?);

        records.push(LabelRecord {
            line: line_number,
            row,
            col,
            passable: flag_field(passable)?,
            encounter: flag_field(encounter)?,
        });
    }

    // Checked before allocating so stray indices cannot size the grid
    let tiles = rows.checked_mul(cols);
    if tiles != Some(records.len()) {
        let last_line = records.last().map_or(1, |r| r.line);
        return Err(malformed_grid(
            last_line,
            &format!("{} records cannot fill a {rows}x{cols} grid", records.len()),
        ));
    }

    let mut seen = Array2::from_elem((rows, cols), false);
    let mut passable = Array2::from_elem((rows, cols), false);
    let mut encounter = Array2::from_elem((rows, cols), false);
    for record in records {
        let at = (record.row, record.col);
        if let Some(flag) = seen.get_mut(at) {
            if *flag {
                return Err(malformed_grid(
                    record.line,
                    &format!("tile ({}, {}) appears more than once", record.row, record.col),
                ));
            }
            *flag = true;
        }
        if let Some(cell) = passable.get_mut(at) {
            *cell = record.passable;
        }
        if let Some(cell) = encounter.get_mut(at) {
            *cell = record.encounter;
        }
    }

    LabelGrid::from_parts(passable, encounter, tile_size)
}

struct LabelRecord {
    line: usize,
    row: usize,
    col: usize,
    passable: bool,
    encounter: bool,
}

/// Read a tabular grid CSV file
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse
pub fn read_labels_csv<P: AsRef<Path>>(path: P, tile_size: usize) -> Result<LabelGrid> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| GridError::FileSystem {
        path: path.to_path_buf(),
        operation: "read labels",
        source: e,
    })?;
    parse_labels_csv(&text, tile_size)
}
