//! Tile partitioning and majority-vote aggregation of category masks
//!
//! Each `tile x tile` block of pixels becomes one grid cell. A category
//! holds for a tile when strictly more than half of its pixels are
//! members. Blocked paint always wins over passable paint in the same
//! tile, so anti-aliased or overlapping obstacles are never walkable.

use crate::analysis::masks::CategoryMasks;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::{CellGrid, CellValue};
use ndarray::{Array2, s};

/// Pixel extent of one tile, half-open on the far edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileBounds {
    /// Grid row of the tile
    pub row: usize,
    /// Grid column of the tile
    pub col: usize,
    /// First pixel row
    pub y0: usize,
    /// One past the last pixel row
    pub y1: usize,
    /// First pixel column
    pub x0: usize,
    /// One past the last pixel column
    pub x1: usize,
}

impl TileBounds {
    /// Number of pixels covered
    pub const fn area(&self) -> usize {
        self.y1.saturating_sub(self.y0) * self.x1.saturating_sub(self.x0)
    }
}

/// Grid shape for an image, as (rows, cols); trailing partial tiles are dropped
pub const fn grid_shape(height: usize, width: usize, tile: usize) -> (usize, usize) {
    if tile == 0 {
        (0, 0)
    } else {
        (height / tile, width / tile)
    }
}

/// Row-major iterator over the tiles of a `height x width` image
///
/// Bounds are clipped to the image edges.
pub fn tile_iter(height: usize, width: usize, tile: usize) -> impl Iterator<Item = TileBounds> {
    let (rows, cols) = grid_shape(height, width, tile);
    (0..rows).flat_map(move |row| {
        (0..cols).map(move |col| TileBounds {
            row,
            col,
            y0: row * tile,
            y1: ((row + 1) * tile).min(height),
            x0: col * tile,
            x1: ((col + 1) * tile).min(width),
        })
    })
}

/// Whether strictly more than half of the tile's pixels are set
///
/// A zero-area tile is never a majority.
pub fn majority(mask: &Array2<bool>, bounds: &TileBounds) -> bool {
    let (height, width) = mask.dim();
    let y1 = bounds.y1.min(height);
    let x1 = bounds.x1.min(width);
    if bounds.y0 >= y1 || bounds.x0 >= x1 {
        return false;
    }

    let block = mask.slice(s![bounds.y0..y1, bounds.x0..x1]);
    let members = block.iter().filter(|&&m| m).count();
    members * 2 > block.len()
}

/// One exported tile decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRecord {
    /// Grid row
    pub row: usize,
    /// Grid column
    pub col: usize,
    /// Walkable after conflict resolution
    pub passable: bool,
    /// Inside an encounter zone
    pub encounter: bool,
}

/// Aggregated per-tile decisions for one extraction run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    passable: Array2<bool>,
    encounter: Array2<bool>,
    tile_size: usize,
    image_dimensions: (usize, usize),
}

impl LabelGrid {
    /// Reduce full-resolution masks to one decision per tile
    ///
    /// Passable is `green majority && !red majority`. Encounter is its own
    /// majority vote, or false everywhere without an encounter mask.
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidParameter` if `tile_size` is zero
    pub fn aggregate(masks: &CategoryMasks, tile_size: usize) -> Result<Self> {
        if tile_size == 0 {
            return Err(invalid_parameter(
                "tile",
                &tile_size,
                &"tile size must be at least one pixel",
            ));
        }

        let (height, width) = masks.dimensions();
        let shape = grid_shape(height, width, tile_size);
        let mut passable = Array2::from_elem(shape, false);
        let mut encounter = Array2::from_elem(shape, false);

        for bounds in tile_iter(height, width, tile_size) {
            let is_green = majority(&masks.passable, &bounds);
            let is_red = majority(&masks.blocked, &bounds);
            if let Some(cell) = passable.get_mut((bounds.row, bounds.col)) {
                *cell = is_green && !is_red;
            }

            if let Some(mask) = &masks.encounter {
                if let Some(cell) = encounter.get_mut((bounds.row, bounds.col)) {
                    *cell = majority(mask, &bounds);
                }
            }
        }

        log::debug!(
            "Aggregated {}x{} tiles of {tile_size}px from a {height}x{width} image",
            shape.0,
            shape.1
        );

        Ok(Self {
            passable,
            encounter,
            tile_size,
            image_dimensions: (height, width),
        })
    }

    /// Build a label grid directly from per-tile decisions
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidParameter` if the arrays differ in shape,
    /// `tile_size` is zero, or the implied image size overflows `usize`
    pub fn from_parts(
        passable: Array2<bool>,
        encounter: Array2<bool>,
        tile_size: usize,
    ) -> Result<Self> {
        if tile_size == 0 {
            return Err(invalid_parameter(
                "tile",
                &tile_size,
                &"tile size must be at least one pixel",
            ));
        }
        if passable.dim() != encounter.dim() {
            return Err(invalid_parameter(
                "encounter",
                &format!("{:?}", encounter.dim()),
                &format!("shape must match passable {:?}", passable.dim()),
            ));
        }

        let (rows, cols) = passable.dim();
        let (Some(height), Some(width)) = (rows.checked_mul(tile_size), cols.checked_mul(tile_size))
        else {
            return Err(invalid_parameter(
                "tile",
                &tile_size,
                &format!("a {rows}x{cols} grid of such tiles overflows the image size"),
            ));
        };

        Ok(Self {
            passable,
            encounter,
            tile_size,
            image_dimensions: (height, width),
        })
    }

    /// Number of tile rows
    pub fn rows(&self) -> usize {
        self.passable.nrows()
    }

    /// Number of tile columns
    pub fn cols(&self) -> usize {
        self.passable.ncols()
    }

    /// Tile edge length in pixels
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Source image dimensions as (height, width)
    pub const fn image_dimensions(&self) -> (usize, usize) {
        self.image_dimensions
    }

    /// Per-tile passable decisions
    pub const fn passable(&self) -> &Array2<bool> {
        &self.passable
    }

    /// Per-tile encounter decisions
    pub const fn encounter(&self) -> &Array2<bool> {
        &self.encounter
    }

    /// Decision for one tile, if in range
    pub fn record(&self, row: usize, col: usize) -> Option<TileRecord> {
        Some(TileRecord {
            row,
            col,
            passable: *self.passable.get((row, col))?,
            encounter: *self.encounter.get((row, col))?,
        })
    }

    /// All decisions in row-major order
    pub fn records(&self) -> impl Iterator<Item = TileRecord> + '_ {
        self.passable
            .indexed_iter()
            .zip(self.encounter.iter())
            .map(|(((row, col), &passable), &encounter)| TileRecord {
                row,
                col,
                passable,
                encounter,
            })
    }

    /// Convert to the plain integer grid consumed by the graph utilities
    ///
    /// Blocked tiles become `0` and passable tiles `1`. With
    /// `mark_encounters`, passable encounter tiles become `2` instead.
    pub fn to_cell_grid(&self, mark_encounters: bool) -> CellGrid {
        let cells = Array2::from_shape_fn(self.passable.dim(), |(row, col)| {
            let passable = self.passable.get((row, col)).copied().unwrap_or(false);
            let encounter = self.encounter.get((row, col)).copied().unwrap_or(false);
            let value = match (passable, mark_encounters && encounter) {
                (false, _) => CellValue::Blocked,
                (true, false) => CellValue::Passable,
                (true, true) => CellValue::Encounter,
            };
            value.code()
        });
        CellGrid::from_array(cells)
    }
}
