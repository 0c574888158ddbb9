//! PNG export of rendered mosaics

use image::RgbaImage;
use std::path::Path;

use crate::io::error::{MosaicError, Result};

/// Create the parent directory of `path` if it has one
///
/// # Errors
///
/// Returns `FileSystem` if the directory cannot be created
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

/// Save a rendered mosaic as PNG
///
/// # Errors
///
/// Returns an error if:
/// - The image has no pixels
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_mosaic_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(MosaicError::InvalidSourceData {
            reason: "Rendered mosaic has no pixels".to_string(),
        });
    }

    ensure_parent_dir(output_path)?;

    image
        .save(output_path)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
