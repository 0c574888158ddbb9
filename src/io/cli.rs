//! Command-line interface for generating mosaics from a tile sheet

use crate::algorithm::executor::{GenerationSummary, Phase, WaveCollapse};
use crate::io::configuration::{
    DEFAULT_FRAME_INTERVAL, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_SEED,
    DEFAULT_SHEET_COLS, DEFAULT_SHEET_ROWS, DEFAULT_TILE_PIXELS, GIF_FRAME_DELAY_MS,
    OUTPUT_SUFFIX,
};
use crate::io::error::{Result, check_dimension, invalid_parameter};
use crate::io::image::export_mosaic_png;
use crate::io::progress::ProgressManager;
use crate::io::render::MosaicRenderer;
use crate::io::tilesheet::{SheetLayout, TileSheetDecoder};
use crate::io::visualization::VisualizationCapture;
use crate::spatial::shift::ShiftDirection;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// A cell pinned to a tile before generation starts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pin {
    /// Row of the pinned cell
    pub y: usize,
    /// Column of the pinned cell
    pub x: usize,
    /// Tile index the cell is fixed to
    pub tile: usize,
}

impl FromStr for Pin {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [y, x, tile] = parts.as_slice() else {
            return Err(format!("expected Y,X,TILE but got '{s}'"));
        };
        let parse = |field: &str, name: &str| {
            field
                .parse::<usize>()
                .map_err(|e| format!("invalid {name} '{field}': {e}"))
        };
        Ok(Self {
            y: parse(y, "row")?,
            x: parse(x, "column")?,
            tile: parse(tile, "tile")?,
        })
    }
}

#[derive(Parser)]
#[command(name = "wfc-mosaic")]
#[command(
    author,
    version,
    about = "Generate edge-matched tile mosaics by wave function collapse"
)]
/// Command-line arguments for the mosaic generator
pub struct Cli {
    /// PNG tile sheet to decode
    #[arg(value_name = "SHEET")]
    pub sheet: PathBuf,

    /// Number of tile rows in the sheet
    #[arg(long, default_value_t = DEFAULT_SHEET_ROWS)]
    pub sheet_rows: u32,

    /// Number of tile columns in the sheet
    #[arg(long, default_value_t = DEFAULT_SHEET_COLS)]
    pub sheet_cols: u32,

    /// Edge length of one sheet tile in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_PIXELS)]
    pub tile_pixels: u32,

    /// Number of grid columns
    #[arg(short = 'W', long, default_value_t = DEFAULT_GRID_WIDTH)]
    pub width: usize,

    /// Number of grid rows
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Pin a cell before generating, as Y,X,TILE (repeatable)
    #[arg(long = "pin", value_name = "Y,X,TILE")]
    pub pins: Vec<Pin>,

    /// Scroll the finished mosaic down this many rows, regenerating and
    /// writing a frame each time
    #[arg(long, default_value_t = 0)]
    pub scroll_down: usize,

    /// Scroll the finished mosaic up this many rows, regenerating each time
    #[arg(long, default_value_t = 0)]
    pub scroll_up: usize,

    /// Output PNG path (defaults to `<SHEET stem>_mosaic.png`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Record the stepping process as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Steps between captured frames when visualizing
    #[arg(long, default_value_t = DEFAULT_FRAME_INTERVAL)]
    pub frame_interval: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Validated generation parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Tile sheet layout
    pub layout: SheetLayout,
    /// Number of grid columns
    pub width: usize,
    /// Number of grid rows
    pub height: usize,
    /// Seed for the collapse draw
    pub seed: u64,
    /// Cells pinned before the first pass
    pub pins: Vec<Pin>,
    /// Scroll passes run after the first pass, in order
    pub scrolls: Vec<ShiftDirection>,
}

impl GenerationConfig {
    /// Validate CLI arguments into a configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a grid dimension is zero or too large, or
    /// a pin lies outside the grid
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        check_dimension("width", cli.width)?;
        check_dimension("height", cli.height)?;

        if let Some(pin) = cli
            .pins
            .iter()
            .find(|pin| pin.y >= cli.height || pin.x >= cli.width)
        {
            return Err(invalid_parameter(
                "pin",
                &format!("{},{},{}", pin.y, pin.x, pin.tile),
                &format!("outside the {}x{} grid", cli.height, cli.width),
            ));
        }

        let scrolls = std::iter::repeat_n(ShiftDirection::Down, cli.scroll_down)
            .chain(std::iter::repeat_n(ShiftDirection::Up, cli.scroll_up))
            .collect();

        Ok(Self {
            layout: SheetLayout {
                rows: cli.sheet_rows,
                cols: cli.sheet_cols,
                tile_pixels: cli.tile_pixels,
            },
            width: cli.width,
            height: cli.height,
            seed: cli.seed,
            pins: cli.pins.clone(),
            scrolls,
        })
    }
}

/// Orchestrates decoding, generation and export for one tile sheet
pub struct MosaicRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MosaicRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self {
            cli,
            progress_manager: None,
        }
    }

    /// Decode the sheet, generate the mosaic and write the outputs
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, sheet decoding, pinning or
    /// export fails
    pub fn process(&mut self) -> Result<GenerationSummary> {
        let config = GenerationConfig::from_cli(&self.cli)?;
        let decoded = TileSheetDecoder::from_png(&self.cli.sheet, config.layout)?;
        info!(
            variants = decoded.tiles.variant_count(),
            colors = decoded.color_count,
            "decoded tile sheet"
        );

        let renderer = MosaicRenderer::new(decoded.images, config.layout.tile_pixels);
        let mut collapse =
            WaveCollapse::new(decoded.tiles, config.width, config.height, config.seed)?;

        for pin in &config.pins {
            collapse.set_cell(pin.y, pin.x, pin.tile)?;
        }

        if self.cli.should_show_progress() {
            self.progress_manager = Some(ProgressManager::new(collapse.grid().cell_count()));
        }
        let mut capture = self
            .cli
            .visualize
            .then(|| VisualizationCapture::new(self.cli.frame_interval));

        let output_path = self
            .cli
            .output
            .clone()
            .unwrap_or_else(|| Self::get_output_path(&self.cli.sheet, "png"));

        let mut total = self.run_pass("generate", &mut collapse, &renderer, &mut capture);
        for (index, direction) in config.scrolls.iter().enumerate() {
            collapse.shift(*direction);
            let label = format!("scroll {}/{}", index + 1, config.scrolls.len());
            let pass = self.run_pass(&label, &mut collapse, &renderer, &mut capture);
            total.steps += pass.steps;
            total.propagations += pass.propagations;
            total.collapses += pass.collapses;
            total.deadends += pass.deadends;

            let frame_path = Self::get_scroll_path(&output_path, index + 1);
            export_mosaic_png(&renderer.render(collapse.grid(), None), &frame_path)?;
            debug!(path = %frame_path.display(), "wrote scroll frame");
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish(&format!("{} deadends", total.deadends));
        }
        if total.deadends > 0 {
            warn!(
                deadends = total.deadends,
                "mosaic contains sentinel tiles from deadends"
            );
        }

        export_mosaic_png(&renderer.render(collapse.grid(), None), &output_path)?;
        info!(path = %output_path.display(), "wrote mosaic");

        if let Some(capture) = &capture {
            let gif_path = output_path.with_extension("gif");
            capture.export_gif(&gif_path, GIF_FRAME_DELAY_MS)?;
            info!(
                path = %gif_path.display(),
                frames = capture.frame_count(),
                "wrote visualization"
            );
        }

        Ok(total)
    }

    /// Step to completion, feeding progress and frame capture along the way
    fn run_pass(
        &self,
        label: &str,
        collapse: &mut WaveCollapse,
        renderer: &MosaicRenderer,
        capture: &mut Option<VisualizationCapture>,
    ) -> GenerationSummary {
        if let Some(ref pm) = self.progress_manager {
            pm.start_pass(label);
        }

        let summary = collapse.generate_with(|collapse, phase, progress| {
            if let Some(ref pm) = self.progress_manager {
                pm.update(collapse.grid().collapsed_count(), progress.steps);
            }
            if let Some(capture) = capture.as_mut() {
                if capture.observe_step() || phase == Phase::Done {
                    capture.record_frame(renderer.render(collapse.grid(), collapse.last_touched()));
                }
            }
        });

        info!(
            pass = label,
            steps = summary.steps,
            collapses = summary.collapses,
            deadends = summary.deadends,
            "pass complete"
        );
        summary
    }

    /// Path of the frame written after scroll pass `index`: `<stem>_<index>.png`
    /// next to the final output
    pub fn get_scroll_path(output_path: &Path, index: usize) -> PathBuf {
        let stem = output_path.file_stem().unwrap_or_default();
        output_path.with_file_name(format!("{}_{index:03}.png", stem.to_string_lossy()))
    }

    /// Default output path next to the sheet: `<stem>_mosaic.<extension>`
    pub fn get_output_path(sheet_path: &Path, extension: &str) -> PathBuf {
        let stem = sheet_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_SUFFIX}.{extension}", stem.to_string_lossy());

        if let Some(parent) = sheet_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
