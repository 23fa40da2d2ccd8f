//! Multi-source, multi-target breadth-first shortest paths on a cell grid
//!
//! All sources are seeded at distance zero, so the first target popped
//! from the queue ends the shortest path from the nearest source to the
//! nearest target, measured in cells.

use crate::spatial::grid::{Cell, CellGrid};
use ndarray::Array2;
use std::collections::{HashSet, VecDeque};

// Up, down, left, right
const STEPS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Shortest cell sequence from a source to a target, both inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPath {
    cells: Vec<Cell>,
}

impl GridPath {
    /// Cells from source to target
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Consume into the cell sequence
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Number of cells, endpoints included
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a found path holds at least its source
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves, one less than the cell count
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Source the path starts from
    pub fn source(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    /// Target the path reaches
    pub fn target(&self) -> Option<Cell> {
        self.cells.last().copied()
    }
}

/// Find a shortest 4-connected path from any source to any target
///
/// A cell can be entered if it holds `passable_value` or is itself a
/// target, so relabeled exits stay reachable as destinations. Sources
/// that are neither passable nor targets, or lie outside the grid, are
/// skipped. Returns `None` when no target is reachable.
pub fn shortest_path<I>(
    grid: &CellGrid,
    sources: I,
    targets: &HashSet<Cell>,
    passable_value: i32,
) -> Option<GridPath>
where
    I: IntoIterator<Item = Cell>,
{
    let enterable =
        |cell: Cell| grid.get(cell) == Some(passable_value) || targets.contains(&cell);

    let shape = (grid.rows(), grid.cols());
    let mut seen = Array2::from_elem(shape, false);
    let mut prev: Array2<Option<Cell>> = Array2::from_elem(shape, None);
    let mut queue = VecDeque::new();

    for source in sources {
        if !grid.contains(source) || !enterable(source) {
            continue;
        }
        if let Some(flag) = seen.get_mut(source) {
            if !*flag {
                *flag = true;
                queue.push_back(source);
            }
        }
    }

    while let Some(current) = queue.pop_front() {
        if targets.contains(&current) {
            return Some(reconstruct(&prev, current));
        }

        for (dr, dc) in STEPS {
            let Some(next) = offset(current, dr, dc) else {
                continue;
            };
            if !grid.contains(next) || !enterable(next) {
                continue;
            }
            let Some(flag) = seen.get_mut(next) else {
                continue;
            };
            if *flag {
                continue;
            }
            *flag = true;
            if let Some(slot) = prev.get_mut(next) {
                *slot = Some(current);
            }
            queue.push_back(next);
        }
    }

    None
}

const fn offset(cell: Cell, dr: isize, dc: isize) -> Option<Cell> {
    match (cell.0.checked_add_signed(dr), cell.1.checked_add_signed(dc)) {
        (Some(row), Some(col)) => Some((row, col)),
        _ => None,
    }
}

// Walks predecessors back to the seeding source, then reverses
fn reconstruct(prev: &Array2<Option<Cell>>, target: Cell) -> GridPath {
    let mut cells = vec![target];
    let mut current = target;
    while let Some(Some(parent)) = prev.get(current) {
        cells.push(*parent);
        current = *parent;
    }
    cells.reverse();
    GridPath { cells }
}
