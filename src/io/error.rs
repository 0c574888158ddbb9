//! Error types for mosaic generation and its file collaborators

use std::fmt;
use std::path::PathBuf;

use crate::io::configuration::MAX_GRID_DIMENSION;

/// Main error type for all crate operations
#[derive(Debug)]
pub enum MosaicError {
    /// A tile set was built without any variants
    EmptyTileSet,

    /// A coordinate or tile index fell outside its valid range
    IndexOutOfRange {
        /// What was being indexed (`"row"`, `"column"`, `"tile"`)
        what: &'static str,
        /// The offending index
        index: usize,
        /// Exclusive upper bound for the index
        limit: usize,
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

    /// Source data doesn't meet decoding requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
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

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTileSet => write!(f, "Tile set contains no variants"),
            Self::IndexOutOfRange { what, index, limit } => {
                write!(f, "{what} index {index} is out of range (limit: {limit})")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
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

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an index out of range error
pub const fn out_of_range(what: &'static str, index: usize, limit: usize) -> MosaicError {
    MosaicError::IndexOutOfRange { what, index, limit }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Check that `index < limit`, reporting `what` on failure
///
/// # Errors
///
/// Returns `IndexOutOfRange` when the index is not below the limit
pub fn check_index(what: &'static str, index: usize, limit: usize) -> Result<usize> {
    if index < limit {
        Ok(index)
    } else {
        Err(out_of_range(what, index, limit))
    }
}

/// Check that a grid dimension lies in `1..=MAX_GRID_DIMENSION`
///
/// # Errors
///
/// Returns `InvalidParameter` naming `parameter` when the value is zero or too large
pub fn check_dimension(parameter: &'static str, value: usize) -> Result<usize> {
    if (1..=MAX_GRID_DIMENSION).contains(&value) {
        Ok(value)
    } else {
        Err(invalid_parameter(
            parameter,
            &value,
            &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
        ))
    }
}
