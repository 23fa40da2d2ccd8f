//! Error types for extraction runs and grid utilities

use std::fmt;
use std::path::PathBuf;

/// Main error type for all extraction and grid operations
#[derive(Debug)]
pub enum GridError {
    /// Source image is missing, unreadable, or not a decodable image
    ImageRead {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Two images that must share dimensions do not
    ShapeMismatch {
        /// Which image disagreed with the base image
        label: &'static str,
        /// Dimensions of the base image (width, height)
        expected: (u32, u32),
        /// Dimensions of the offending image (width, height)
        found: (u32, u32),
    },

    /// Invocation does not name a usable input mode
    Usage {
        /// What the operator has to supply
        reason: String,
    },

    /// Integer-matrix text could not be parsed into a rectangular grid
    MalformedGrid {
        /// 1-based line number of the offending row
        line: usize,
        /// Description of what was wrong on that line
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageRead { path, source } => {
                write!(f, "Failed to read image '{}': {source}", path.display())
            }
            Self::ShapeMismatch {
                label,
                expected,
                found,
            } => {
                write!(
                    f,
                    "The {label} image is {}x{} but the base image is {}x{}",
                    found.0, found.1, expected.0, expected.1
                )
            }
            Self::Usage { reason } => write!(f, "Usage error: {reason}"),
            Self::MalformedGrid { line, reason } => {
                write!(f, "Malformed grid at line {line}: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageRead { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for grid results
pub type Result<T> = std::result::Result<T, GridError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GridError {
    GridError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a malformed grid error for a 1-based line number
pub fn malformed_grid(line: usize, reason: &impl ToString) -> GridError {
    GridError::MalformedGrid {
        line,
        reason: reason.to_string(),
    }
}
