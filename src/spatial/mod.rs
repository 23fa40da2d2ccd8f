//! Spatial data structures
//!
//! This module contains:
//! - Tile partitioning and majority-vote aggregation
//! - The integer cell grid with exit detection and relabeling

/// Integer cell grid, boundary exits, and relabeling
pub mod grid;
/// Tile bounds and majority aggregation of masks
pub mod tiles;

pub use grid::{Cell, CellGrid};
pub use tiles::LabelGrid;
