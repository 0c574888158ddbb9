//! Tile sheet decoding into edge-coded tile variants
//!
//! A sheet is a PNG holding a grid of square tiles. The color of each tile
//! corner is sampled just inside the border. Colors are numbered in the order
//! they are first seen, and each edge code combines the numbers of the two
//! corners on that edge. Every sheet tile yields two variants: the tile itself
//! and its transpose. The color numbering lives in the decoder, so the solver
//! only ever sees finished edge codes.
//!
//! The sheet's top-left pixel names its background color. Background pixels
//! are flattened to black before sampling, and black is drawn transparent.

use std::collections::HashMap;
use std::path::Path;

use image::{Rgba, RgbaImage, imageops};

use crate::io::configuration::{
    CORNER_INSET, CORNER_WEIGHT, DEFAULT_SHEET_COLS, DEFAULT_SHEET_ROWS, DEFAULT_TILE_PIXELS,
};
use crate::io::error::{MosaicError, Result};
use crate::spatial::tiles::{EdgeCode, TileSet, TileVariant};

/// Arrangement of tiles in a sheet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetLayout {
    /// Number of tile rows
    pub rows: u32,
    /// Number of tile columns
    pub cols: u32,
    /// Edge length of one tile in pixels
    pub tile_pixels: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            rows: DEFAULT_SHEET_ROWS,
            cols: DEFAULT_SHEET_COLS,
            tile_pixels: DEFAULT_TILE_PIXELS,
        }
    }
}

/// Tile set decoded from a sheet, with one image per variant
pub struct DecodedTiles {
    /// Edge codes, indexed like `images`
    pub tiles: TileSet,
    /// Drawable image of every variant
    pub images: Vec<RgbaImage>,
    /// Distinct corner colors seen while decoding
    pub color_count: usize,
}

/// Edge codes of a tile from the color numbers of its corners
pub const fn edges_from_corners(
    top_left: EdgeCode,
    top_right: EdgeCode,
    bottom_left: EdgeCode,
    bottom_right: EdgeCode,
) -> TileVariant {
    TileVariant::new(
        CORNER_WEIGHT * top_left + top_right,
        CORNER_WEIGHT * top_right + bottom_right,
        CORNER_WEIGHT * bottom_left + bottom_right,
        CORNER_WEIGHT * top_left + bottom_left,
    )
}

/// Mirror an image across its main diagonal
pub fn transpose(image: &RgbaImage) -> RgbaImage {
    imageops::rotate270(&imageops::flip_horizontal(image))
}

/// Decoder holding the color numbering for one sheet
pub struct TileSheetDecoder {
    layout: SheetLayout,
    colors: HashMap<[u8; 3], EdgeCode>,
}

impl TileSheetDecoder {
    /// Create a decoder with an empty color numbering
    pub fn new(layout: SheetLayout) -> Self {
        Self {
            layout,
            colors: HashMap::new(),
        }
    }

    /// Load a PNG sheet and decode it
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or is not a valid image
    /// - The sheet is smaller than the layout requires
    /// - The layout contains no tiles
    pub fn from_png(path: &Path, layout: SheetLayout) -> Result<DecodedTiles> {
        let sheet = image::open(path)
            .map_err(|e| MosaicError::ImageLoad {
                path: path.to_path_buf(),
                source: e,
            })?
            .to_rgba8();
        Self::new(layout).decode(&sheet)
    }

    /// Decode every tile of an in-memory sheet
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sheet is smaller than the layout requires
    /// - The layout contains no tiles
    pub fn decode(mut self, sheet: &RgbaImage) -> Result<DecodedTiles> {
        let SheetLayout {
            rows,
            cols,
            tile_pixels,
        } = self.layout;

        if tile_pixels <= CORNER_INSET * 2 {
            return Err(MosaicError::InvalidSourceData {
                reason: format!("Tiles of {tile_pixels} pixels are too small to sample corners"),
            });
        }

        let needed = (
            u64::from(cols) * u64::from(tile_pixels),
            u64::from(rows) * u64::from(tile_pixels),
        );
        if u64::from(sheet.width()) < needed.0 || u64::from(sheet.height()) < needed.1 {
            return Err(MosaicError::InvalidSourceData {
                reason: format!(
                    "Sheet is {}x{} pixels but the layout needs {}x{}",
                    sheet.width(),
                    sheet.height(),
                    needed.0,
                    needed.1
                ),
            });
        }

        let sheet = flatten_background(sheet);
        let mut variants = Vec::new();
        let mut images = Vec::new();

        for row in 0..rows {
            for col in 0..cols {
                let tile = imageops::crop_imm(
                    &sheet,
                    col * tile_pixels,
                    row * tile_pixels,
                    tile_pixels,
                    tile_pixels,
                )
                .to_image();

                let flipped = transpose(&tile);
                for image in [tile, flipped] {
                    variants.push(self.decode_tile(&image));
                    images.push(with_color_key(image, BLACK));
                }
            }
        }

        Ok(DecodedTiles {
            tiles: TileSet::new(variants)?,
            images,
            color_count: self.colors.len(),
        })
    }

    /// Number assigned to a color, registering it when first seen
    ///
    /// Alpha is ignored, so transparent and opaque black share a number.
    fn color_index(&mut self, pixel: Rgba<u8>) -> EdgeCode {
        let [r, g, b, _] = pixel.0;
        let next = self.colors.len() as EdgeCode;
        *self.colors.entry([r, g, b]).or_insert(next)
    }

    fn decode_tile(&mut self, image: &RgbaImage) -> TileVariant {
        let far = self.layout.tile_pixels - 1 - CORNER_INSET;
        let mut sample = |x: u32, y: u32| {
            let pixel = image
                .get_pixel_checked(x, y)
                .copied()
                .unwrap_or(Rgba([0, 0, 0, 0]));
            self.color_index(pixel)
        };

        // Sampling order fixes the color numbering
        let top_left = sample(CORNER_INSET, CORNER_INSET);
        let bottom_left = sample(CORNER_INSET, far);
        let top_right = sample(far, CORNER_INSET);
        let bottom_right = sample(far, far);

        edges_from_corners(top_left, top_right, bottom_left, bottom_right)
    }
}

const BLACK: [u8; 3] = [0, 0, 0];

/// Copy of the sheet with its background color replaced by transparent black
///
/// The background is whatever color the top-left pixel holds.
fn flatten_background(sheet: &RgbaImage) -> RgbaImage {
    let mut flat = sheet.clone();
    let Some(&Rgba([r, g, b, _])) = sheet.get_pixel_checked(0, 0) else {
        return flat;
    };
    for pixel in flat.pixels_mut() {
        let [pr, pg, pb, _] = pixel.0;
        if [pr, pg, pb] == [r, g, b] {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
    flat
}

/// Make every pixel of `key` fully transparent
fn with_color_key(mut image: RgbaImage, key: [u8; 3]) -> RgbaImage {
    for pixel in image.pixels_mut() {
        let [r, g, b, alpha] = &mut pixel.0;
        if [*r, *g, *b] == key {
            *alpha = 0;
        }
    }
    image
}
