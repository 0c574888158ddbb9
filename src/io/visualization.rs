//! Frame capture and GIF generation for stepping visualization

use std::path::Path;

use image::{Delay, Frame, RgbaImage};

use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{MosaicError, Result};
use crate::io::image::ensure_parent_dir;

/// Captures rendered frames while the scheduler steps
///
/// Only every `interval`-th observed step is kept, so long runs stay small.
pub struct VisualizationCapture {
    pub(crate) frames: Vec<RgbaImage>,
    interval: usize,
    observed: usize,
}

impl VisualizationCapture {
    /// Create a capture keeping one frame per `interval` steps
    ///
    /// An interval of zero is treated as one.
    pub fn new(interval: usize) -> Self {
        Self {
            frames: Vec::new(),
            interval: interval.max(1),
            observed: 0,
        }
    }

    /// Count a step and report whether its frame should be captured
    pub const fn observe_step(&mut self) -> bool {
        self.observed += 1;
        self.observed % self.interval == 0
    }

    /// Store a rendered frame
    pub fn record_frame(&mut self, frame: RgbaImage) {
        self.frames.push(frame);
    }

    /// Number of frames captured
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// If `frame_delay_ms` is below what viewers reliably display, frames are
    /// dropped so the apparent animation speed stays the same. The last frame
    /// is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(MosaicError::InvalidSourceData {
                reason: "No frames captured for visualization".to_string(),
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let frames = self.generate_frames(effective_delay_ms, skip_factor);

        ensure_parent_dir(output_path)?;

        let file = std::fs::File::create(output_path).map_err(|e| MosaicError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| MosaicError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let delay = Delay::from_numer_denom_ms(delay_ms, 1);
        let last_index = self.frames.len().saturating_sub(1);

        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .enumerate()
            .filter(|(index, _)| index % skip_factor == 0 || *index == last_index)
            .map(|(_, image)| Frame::from_parts(image.clone(), 0, 0, delay))
            .collect();

        // Final frame displays longer for better visibility
        if let Some(last) = self.frames.last() {
            frames.push(Frame::from_parts(
                last.clone(),
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms * 25, 1),
            ));
        }

        frames
    }
}
