//! Input/output: command line, configuration, errors, and file formats

use crate::io::error::{GridError, Result};
use std::path::Path;

/// Command-line interface and subcommand execution
pub mod cli;
/// Default thresholds, paths, and overlay colors
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Tabular grid CSV export and read-back
pub mod export;
/// Image loading, alpha compositing, and PNG export
pub mod image;
/// Plain integer-matrix grid serialization
pub mod matrix;
/// Overlay rendering for visual validation
pub mod visualization;

// Creates the parent directory of an output path if it has one
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| GridError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })
        }
        _ => Ok(()),
    }
}
