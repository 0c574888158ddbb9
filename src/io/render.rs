//! Drawing the grid as an RGBA image
//!
//! Collapsed cells show their tile image. Open cells show a gray shade that
//! darkens as entropy grows, in `ENTROPY_BANDS` steps. The cell most recently
//! propagated is outlined.

use image::{Rgba, RgbaImage, imageops};

use crate::io::configuration::{BACKGROUND_COLOR, ENTROPY_BANDS, LAST_TOUCHED_COLOR};
use crate::spatial::grid::Grid;

/// Band index of an entropy value among `ENTROPY_BANDS` equal slices of the
/// variant count
///
/// Band `i` covers entropies below `(variant_count / ENTROPY_BANDS) * (i + 1)`;
/// everything above the last threshold falls into the top band.
pub fn entropy_band(entropy: usize, variant_count: usize) -> usize {
    let step = variant_count / ENTROPY_BANDS;
    (0..ENTROPY_BANDS - 1)
        .find(|&band| entropy < step * (band + 1))
        .unwrap_or(ENTROPY_BANDS - 1)
}

/// Fill color for an open cell in the given entropy band
pub fn band_color(band: usize) -> Rgba<u8> {
    let span = 200 / ENTROPY_BANDS;
    let level = 220_usize.saturating_sub(span * band.min(ENTROPY_BANDS - 1)) as u8;
    Rgba([level, level, level, 255])
}

/// Renders grids using one image per tile variant
pub struct MosaicRenderer {
    images: Vec<RgbaImage>,
    tile_pixels: u32,
}

impl MosaicRenderer {
    /// Create a renderer; every image is drawn into a `tile_pixels` square
    pub const fn new(images: Vec<RgbaImage>, tile_pixels: u32) -> Self {
        Self {
            images,
            tile_pixels,
        }
    }

    /// Edge length of one cell in pixels
    pub const fn tile_pixels(&self) -> u32 {
        self.tile_pixels
    }

    /// Draw the grid, outlining `last_touched` if given
    pub fn render(&self, grid: &Grid, last_touched: Option<(usize, usize)>) -> RgbaImage {
        let size = self.tile_pixels;
        let mut canvas = RgbaImage::from_pixel(
            grid.width() as u32 * size,
            grid.height() as u32 * size,
            Rgba(BACKGROUND_COLOR),
        );

        for ((y, x), cell) in grid.indexed_cells() {
            let left = x as u32 * size;
            let top = y as u32 * size;
            let image = cell.tile().and_then(|tile| self.images.get(tile));
            if let Some(image) = image {
                imageops::overlay(&mut canvas, image, i64::from(left), i64::from(top));
            } else if !cell.is_collapsed() {
                let color = band_color(entropy_band(cell.entropy(), grid.variant_count()));
                fill_rect(&mut canvas, left, top, size, size, color);
            }
        }

        if let Some((y, x)) = last_touched {
            outline_rect(
                &mut canvas,
                x as u32 * size,
                y as u32 * size,
                size,
                Rgba(LAST_TOUCHED_COLOR),
            );
        }

        canvas
    }
}

fn fill_rect(canvas: &mut RgbaImage, left: u32, top: u32, width: u32, height: u32, color: Rgba<u8>) {
    for y in top..top.saturating_add(height) {
        for x in left..left.saturating_add(width) {
            if let Some(pixel) = canvas.get_pixel_mut_checked(x, y) {
                *pixel = color;
            }
        }
    }
}

fn outline_rect(canvas: &mut RgbaImage, left: u32, top: u32, size: u32, color: Rgba<u8>) {
    let Some(last) = size.checked_sub(1) else {
        return;
    };
    fill_rect(canvas, left, top, size, 2, color);
    fill_rect(canvas, left, top + last.saturating_sub(1), size, 2, color);
    fill_rect(canvas, left, top, 2, size, color);
    fill_rect(canvas, left + last.saturating_sub(1), top, 2, size, color);
}
