//! Tile grid extraction from painted map masks, plus shortest-path queries over the result
//!
//! Mask images are classified pixel by pixel into passable, blocked, and
//! encounter paint, reduced to one decision per tile by majority vote, and
//! exported as a CSV table and a validation overlay. The integer grid form
//! of that result is then treated as a 4-connected graph for boundary exit
//! detection, relabeling, and multi-source breadth-first search.

#![deny(unsafe_code)]

/// Grid and zone-level path finding
pub mod algorithm;
/// Color classification of mask images
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Tile aggregation and the integer cell grid
pub mod spatial;

pub use io::error::{GridError, Result};
