//! Integer cell grid with boundary exit detection and relabeling
//!
//! The grid is the durable artifact of an extraction run. Downstream tools
//! treat it as an implicit graph: cells holding the passable marker are
//! nodes and edges join 4-adjacent passable cells.

use crate::io::error::{GridError, Result, invalid_parameter};
use ndarray::Array2;
use std::fmt;
use std::str::FromStr;

/// Grid coordinate as (row, col)
pub type Cell = (usize, usize);

/// One of the four grid boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Row 0
    Top,
    /// Last row
    Bottom,
    /// Column 0
    Left,
    /// Last column
    Right,
}

impl Edge {
    /// All edges in scan order
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Lowercase name used on the command line
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Edge {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|edge| edge.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| invalid_parameter("edge", &s, &"expected top, bottom, left or right"))
    }
}

/// Canonical cell values
///
/// Exit connectors get one sentinel per boundary so a relabeled grid
/// still records which neighboring zone each exit leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellValue {
    /// Obstacle
    Blocked,
    /// Ordinary walkable cell
    Passable,
    /// Walkable cell inside an encounter zone
    Encounter,
    /// Connector on the given boundary
    Exit(Edge),
}

impl CellValue {
    /// Integer written to the grid for this value
    pub const fn code(self) -> i32 {
        match self {
            Self::Blocked => 0,
            Self::Passable => 1,
            Self::Encounter => 2,
            Self::Exit(Edge::Top) => 3,
            Self::Exit(Edge::Bottom) => 4,
            Self::Exit(Edge::Left) => 5,
            Self::Exit(Edge::Right) => 6,
        }
    }

    /// Interpret a grid integer, `None` for application-defined values
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Blocked),
            1 => Some(Self::Passable),
            2 => Some(Self::Encounter),
            3 => Some(Self::Exit(Edge::Top)),
            4 => Some(Self::Exit(Edge::Bottom)),
            5 => Some(Self::Exit(Edge::Left)),
            6 => Some(Self::Exit(Edge::Right)),
            _ => None,
        }
    }
}

impl From<CellValue> for i32 {
    fn from(value: CellValue) -> Self {
        value.code()
    }
}

/// Rectangular grid of integer cell values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    cells: Array2<i32>,
}

impl CellGrid {
    /// Wrap an existing array
    pub const fn from_array(cells: Array2<i32>) -> Self {
        Self { cells }
    }

    /// Build from row vectors
    ///
    /// # Errors
    ///
    /// Returns `GridError::MalformedGrid` if rows differ in length
    pub fn from_rows(rows: &[Vec<i32>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut flat = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::MalformedGrid {
                    line: index + 1,
                    reason: format!("expected {cols} values, found {}", row.len()),
                });
            }
            flat.extend_from_slice(row);
        }

        Array2::from_shape_vec((rows.len(), cols), flat)
            .map(Self::from_array)
            .map_err(|e| GridError::MalformedGrid {
                line: 1,
                reason: e.to_string(),
            })
    }

    /// Underlying array
    pub const fn cells(&self) -> &Array2<i32> {
        &self.cells
    }

    /// Consume into the underlying array
    pub fn into_array(self) -> Array2<i32> {
        self.cells
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Value at a cell, if in range
    pub fn get(&self, cell: Cell) -> Option<i32> {
        self.cells.get(cell).copied()
    }

    /// Whether the cell lies inside the grid
    pub fn contains(&self, cell: Cell) -> bool {
        cell.0 < self.rows() && cell.1 < self.cols()
    }

    /// Passable cells on one boundary, in ascending row or column order
    ///
    /// These are where the zone's walkable area touches the map edge,
    /// i.e. the handoff points to the neighboring zone.
    pub fn edge_exits(&self, edge: Edge, passable_value: i32) -> Vec<Cell> {
        let (rows, cols) = (self.rows(), self.cols());
        if rows == 0 || cols == 0 {
            return Vec::new();
        }

        let line: Vec<Cell> = match edge {
            Edge::Top => (0..cols).map(|c| (0, c)).collect(),
            Edge::Bottom => (0..cols).map(|c| (rows - 1, c)).collect(),
            Edge::Left => (0..rows).map(|r| (r, 0)).collect(),
            Edge::Right => (0..rows).map(|r| (r, cols - 1)).collect(),
        };

        line.into_iter()
            .filter(|&cell| self.get(cell) == Some(passable_value))
            .collect()
    }

    /// Overwrite every listed cell with `value`
    ///
    /// Previous contents are not checked. Cells outside the grid are
    /// skipped with a warning.
    pub fn relabel<I>(&mut self, cells: I, value: impl Into<i32>) -> &mut Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let value = value.into();
        let (rows, cols) = (self.rows(), self.cols());
        for cell in cells {
            match self.cells.get_mut(cell) {
                Some(slot) => *slot = value,
                None => log::warn!(
                    "Skipping relabel of ({}, {}): outside {}x{} grid",
                    cell.0,
                    cell.1,
                    rows,
                    cols
                ),
            }
        }
        self
    }
}

/// Parse a cell written as `row,col`
///
/// # Errors
///
/// Returns `GridError::InvalidParameter` if the text is not two
/// non-negative integers separated by a comma
pub fn parse_cell(s: &str) -> Result<Cell> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| invalid_parameter("cell", &s, &"expected the form row,col"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| invalid_parameter("cell", &s, &e))
    };
    Ok((parse(row)?, parse(col)?))
}
