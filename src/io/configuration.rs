//! Generation constants and runtime configuration defaults

// Grid defaults
/// Default number of grid columns
pub const DEFAULT_GRID_WIDTH: usize = 12;
/// Default number of grid rows
pub const DEFAULT_GRID_HEIGHT: usize = 12;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 1_000;
/// Most recent deadend events kept in memory; older ones only add to the count
pub const MAX_RECORDED_DEADENDS: usize = 256;

// Tile sheet layout
/// Edge length of one square tile in pixels
pub const DEFAULT_TILE_PIXELS: u32 = 64;
/// Number of tile rows in the default sheet
pub const DEFAULT_SHEET_ROWS: u32 = 9;
/// Number of tile columns in the default sheet
pub const DEFAULT_SHEET_COLS: u32 = 13;
/// Distance of the sampled corner pixels from the tile border
pub const CORNER_INSET: u32 = 1;
/// Multiplier for the first corner when two corner colors form an edge code
pub const CORNER_WEIGHT: u32 = 8;

// Rendering
/// Number of gray levels used to shade uncollapsed cells by entropy
pub const ENTROPY_BANDS: usize = 5;
/// Color of the outline drawn around the most recently propagated cell
pub const LAST_TOUCHED_COLOR: [u8; 4] = [255, 64, 64, 255];
/// Background color behind tile images
pub const BACKGROUND_COLOR: [u8; 4] = [3, 78, 121, 255];

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Steps between captured frames when visualizing
pub const DEFAULT_FRAME_INTERVAL: usize = 4;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
